//! Push/pull reconciliation: decide create-vs-update by searching the gist
//! list for a description matching the local file's base name.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::api::{Gist, GistApi, GistFile, GistFiles};
use crate::error::SyncError;

/// The gist whose description equals `filename`, if any.
///
/// Several gists can share a description; the first one the API lists wins.
pub fn find_gist(api: &dyn GistApi, filename: &str) -> Result<Option<Gist>> {
    let gists = api.list()?;
    Ok(gists
        .into_iter()
        .find(|gist| gist.description.as_deref() == Some(filename)))
}

/// Upload the local file, updating the matching gist or creating a new one.
/// Returns the gist's html URL.
pub fn push(api: &dyn GistApi, vimrc: &Path) -> Result<String> {
    let filename = base_name(vimrc)?;
    let found = find_gist(api, &filename)?;

    let content = fs::read_to_string(vimrc)
        .with_context(|| format!("failed to read {}", vimrc.display()))?;
    let mut files = GistFiles::new();
    files.insert(filename.clone(), GistFile { content });

    match found {
        Some(gist) => api.update(&gist, &files),
        None => api.create(&filename, &files),
    }
}

/// Overwrite the local file with the matching gist's content, truncating
/// whatever was there before.
pub fn pull(api: &dyn GistApi, vimrc: &Path) -> Result<()> {
    let filename = base_name(vimrc)?;
    let gist = find_gist(api, &filename)?
        .ok_or_else(|| SyncError::NoGistToPull(filename.clone()))?;

    let mut contents = api.content(&gist.id)?;
    let content = contents
        .remove(&filename)
        .with_context(|| format!("gist {} has no file named '{filename}'", gist.id))?;

    fs::write(vimrc, content.as_bytes())
        .with_context(|| format!("failed to write {}", vimrc.display()))
}

fn base_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_owned)
        .with_context(|| format!("{} has no usable file name", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// In-memory gist store recording how often each write operation ran.
    #[derive(Default)]
    struct FakeApi {
        gists: RefCell<Vec<Gist>>,
        contents: RefCell<BTreeMap<String, BTreeMap<String, String>>>,
        creates: RefCell<usize>,
        updates: RefCell<usize>,
    }

    impl FakeApi {
        fn with_gist(id: &str, description: &str, filename: &str, content: &str) -> Self {
            let api = FakeApi::default();
            api.gists.borrow_mut().push(gist(id, description));
            api.contents.borrow_mut().insert(
                id.to_string(),
                BTreeMap::from([(filename.to_string(), content.to_string())]),
            );
            api
        }
    }

    impl GistApi for FakeApi {
        fn list(&self) -> Result<Vec<Gist>> {
            Ok(self.gists.borrow().clone())
        }

        fn create(&self, description: &str, files: &GistFiles) -> Result<String> {
            *self.creates.borrow_mut() += 1;
            let id = format!("created-{}", self.gists.borrow().len());
            self.gists.borrow_mut().push(gist(&id, description));
            self.contents.borrow_mut().insert(id, flatten(files));
            Ok("https://gist.github.com/new".into())
        }

        fn update(&self, gist: &Gist, files: &GistFiles) -> Result<String> {
            *self.updates.borrow_mut() += 1;
            self.contents
                .borrow_mut()
                .insert(gist.id.clone(), flatten(files));
            Ok(format!("https://gist.github.com/{}", gist.id))
        }

        fn content(&self, id: &str) -> Result<BTreeMap<String, String>> {
            self.contents
                .borrow()
                .get(id)
                .cloned()
                .context("no such gist")
        }
    }

    fn flatten(files: &GistFiles) -> BTreeMap<String, String> {
        files
            .iter()
            .map(|(name, file)| (name.clone(), file.content.clone()))
            .collect()
    }

    fn gist(id: &str, description: &str) -> Gist {
        Gist {
            id: id.into(),
            description: Some(description.into()),
        }
    }

    fn local_vimrc(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join(".vimrc");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn find_gist_matches_on_description() {
        let api = FakeApi::with_gist("aa11", ".vimrc", ".vimrc", "");
        let found = find_gist(&api, ".vimrc").unwrap().unwrap();
        assert_eq!(found.id, "aa11");
    }

    #[test]
    fn find_gist_returns_none_without_a_match() {
        let api = FakeApi::with_gist("aa11", "notes.md", "notes.md", "");
        assert!(find_gist(&api, ".vimrc").unwrap().is_none());
    }

    #[test]
    fn find_gist_skips_gists_without_a_description() {
        let api = FakeApi::default();
        api.gists.borrow_mut().push(Gist {
            id: "aa11".into(),
            description: None,
        });
        assert!(find_gist(&api, ".vimrc").unwrap().is_none());
    }

    #[test]
    fn find_gist_picks_the_first_of_duplicates() {
        let api = FakeApi::default();
        api.gists.borrow_mut().push(gist("first", ".vimrc"));
        api.gists.borrow_mut().push(gist("second", ".vimrc"));

        let found = find_gist(&api, ".vimrc").unwrap().unwrap();
        assert_eq!(found.id, "first");
    }

    #[test]
    fn push_creates_when_no_gist_matches() {
        let dir = TempDir::new().unwrap();
        let vimrc = local_vimrc(&dir, "set number\n");
        let api = FakeApi::default();

        let url = push(&api, &vimrc).unwrap();

        assert_eq!(*api.creates.borrow(), 1);
        assert_eq!(*api.updates.borrow(), 0);
        assert!(!url.is_empty());
        assert_eq!(
            api.contents.borrow()["created-0"][".vimrc"],
            "set number\n"
        );
    }

    #[test]
    fn push_updates_when_a_gist_matches() {
        let dir = TempDir::new().unwrap();
        let vimrc = local_vimrc(&dir, "set number\n");
        let api = FakeApi::with_gist("aa11", ".vimrc", ".vimrc", "old remote");

        let url = push(&api, &vimrc).unwrap();

        assert_eq!(*api.updates.borrow(), 1);
        assert_eq!(*api.creates.borrow(), 0);
        assert_eq!(url, "https://gist.github.com/aa11");
        assert_eq!(api.contents.borrow()["aa11"][".vimrc"], "set number\n");
    }

    #[test]
    fn pull_with_no_match_is_no_gist_to_pull() {
        let dir = TempDir::new().unwrap();
        let vimrc = local_vimrc(&dir, "set number\n");
        let api = FakeApi::default();

        let err = pull(&api, &vimrc).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SyncError>(),
            Some(SyncError::NoGistToPull(name)) if name == ".vimrc"
        ));
    }

    #[test]
    fn pull_overwrites_local_content() {
        let dir = TempDir::new().unwrap();
        let vimrc = local_vimrc(&dir, "old local content that is longer\n");
        let api = FakeApi::with_gist("aa11", ".vimrc", ".vimrc", "set number\n");

        pull(&api, &vimrc).unwrap();
        assert_eq!(std::fs::read_to_string(&vimrc).unwrap(), "set number\n");
    }

    #[test]
    fn pull_fails_when_the_gist_lacks_the_file() {
        let dir = TempDir::new().unwrap();
        let vimrc = local_vimrc(&dir, "set number\n");
        let api = FakeApi::with_gist("aa11", ".vimrc", "other-file", "nope");

        let err = pull(&api, &vimrc).unwrap_err();
        // A generic error, not a NoGistToPull.
        assert!(err.downcast_ref::<SyncError>().is_none());
        assert!(
            err.to_string().contains("has no file named"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn push_then_pull_leaves_the_file_byte_identical() {
        let dir = TempDir::new().unwrap();
        let original = "\" my vimrc\nset number\nset expandtab\n";
        let vimrc = local_vimrc(&dir, original);
        let api = FakeApi::default();

        push(&api, &vimrc).unwrap();
        std::fs::write(&vimrc, "scribbled over\n").unwrap();
        pull(&api, &vimrc).unwrap();

        assert_eq!(std::fs::read_to_string(&vimrc).unwrap(), original);
    }
}

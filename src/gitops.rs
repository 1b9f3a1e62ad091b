//! Native git operations for configuration repositories.

use std::path::Path;

use anyhow::{Context, Result};
use git2::{FetchOptions, Repository, build::RepoBuilder};

/// Clone a configuration repository with an optional branch.
pub fn clone_config_repo(url: &str, target: &Path, branch: Option<&str>) -> Result<Repository> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(git2::RemoteCallbacks::new());

    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch_options);
    if let Some(branch_name) = branch {
        builder.branch(branch_name);
    }

    builder
        .clone(url, target)
        .with_context(|| format!("cloning {} into {}", url, target.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Signature;

    fn make_source_repo(dir: &Path) -> Result<()> {
        let repo = Repository::init(dir)?;
        std::fs::write(dir.join("init.lua"), "-- managed config\n")?;
        let mut index = repo.index()?;
        index.add_path(Path::new("init.lua"))?;
        index.write()?;
        let tree_id = index.write_tree()?;
        let tree = repo.find_tree(tree_id)?;
        let sig = Signature::now("devup", "devup@localhost")?;
        repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])?;
        Ok(())
    }

    #[test]
    fn clones_a_local_repo() {
        let source = tempfile::tempdir().unwrap();
        make_source_repo(source.path()).unwrap();

        let dest = tempfile::tempdir().unwrap();
        let target = dest.path().join("configs/nvim");
        clone_config_repo(source.path().to_str().unwrap(), &target, None).unwrap();

        assert!(target.join(".git").exists());
        assert!(target.join("init.lua").exists());
    }

    #[test]
    fn clone_into_unreachable_source_fails() {
        let dest = tempfile::tempdir().unwrap();
        let target = dest.path().join("nvim");
        let result = clone_config_repo("/nonexistent/definitely-not-a-repo", &target, None);
        assert!(result.is_err());
    }
}

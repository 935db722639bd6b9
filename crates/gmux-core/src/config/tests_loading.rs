//! Loading-focused tests for project files
//!
//! Tests for locating, listing, substituting, and parsing project files, and
//! for the starter template and editor handoff.

#[cfg(test)]
mod loading_tests {
    use std::{collections::BTreeMap, fs, path::Path};

    use serial_test::serial;

    use super::super::load::expand;
    use crate::{
        config::{
            config_dir, edit_config, editor, list_configs, load_config, log_path, new_config,
            project_path, substitute, template, DEFAULT_EDITOR,
        },
        model::{Config, Split},
        paths::PathResolver,
        testing::MockRunner,
        Error, Result,
    };

    fn settings(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn write(dir: &Path, name: &str, content: &str) -> Result<std::path::PathBuf> {
        let path = dir.join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    // ========================================================================
    // Paths
    // ========================================================================

    #[test]
    fn test_config_dir_under_home() {
        let paths = PathResolver::with_home("/home/u");
        assert_eq!(
            config_dir(&paths),
            Some(Path::new("/home/u/.config/gmux").to_path_buf())
        );
        assert_eq!(
            log_path(&paths),
            Some(Path::new("/home/u/.config/gmux/gmux.log").to_path_buf())
        );
    }

    #[test]
    fn test_config_dir_without_home() {
        assert_eq!(config_dir(&PathResolver::default()), None);
    }

    #[test]
    fn test_project_path_prefers_yml() -> Result<()> {
        let dir = tempfile::tempdir()?;
        assert_eq!(project_path(dir.path(), "work"), dir.path().join("work.yml"));

        write(dir.path(), "work.yaml", "session: work")?;
        assert_eq!(project_path(dir.path(), "work"), dir.path().join("work.yaml"));

        write(dir.path(), "work.yml", "session: work")?;
        assert_eq!(project_path(dir.path(), "work"), dir.path().join("work.yml"));
        Ok(())
    }

    // ========================================================================
    // Loading
    // ========================================================================

    #[test]
    fn test_load_config_parses_full_model() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write(
            dir.path(),
            "work.yml",
            "session: work
root: ~/src/$project
rebalance_panes_after: 3
env:
  RUST_LOG: debug
windows:
  - name: code
    layout: main-vertical
    commands:
      - vim
  - name: logs
    manual: true
    panes:
      - type: vertical
        root: /var/log
        commands:
          - tail -f ${file}
",
        )?;

        let config = load_config(
            &path,
            &settings(&[("project", "gmux"), ("file", "syslog")]),
        )?;

        assert_eq!(config.session, "work");
        assert_eq!(config.root, "~/src/gmux");
        assert_eq!(config.rebalance_threshold(), 3);
        assert_eq!(config.env.get("RUST_LOG").map(String::as_str), Some("debug"));
        assert_eq!(config.windows.len(), 2);
        assert!(config.windows[1].manual);
        assert_eq!(config.windows[1].panes[0].split, Split::Vertical);
        assert_eq!(config.windows[1].panes[0].commands, vec!["tail -f syslog"]);
        Ok(())
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config(Path::new("/nonexistent/gmux/none.yml"), &BTreeMap::new());

        let Err(err) = result else {
            panic!("expected read failure");
        };
        assert!(matches!(err, Error::ConfigRead { .. }));
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("/nonexistent/gmux/none.yml"));
    }

    #[test]
    fn test_load_config_malformed_yaml() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write(dir.path(), "bad.yml", "session: [unclosed\nwindows: {")?;

        let result = load_config(&path, &BTreeMap::new());

        assert!(matches!(result, Err(Error::ConfigParse { .. })));
        Ok(())
    }

    #[test]
    fn test_load_config_rejects_missing_session() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write(dir.path(), "anon.yml", "windows:\n  - name: a\n")?;

        let result = load_config(&path, &BTreeMap::new());

        assert!(matches!(result, Err(Error::InvalidConfig(_))));
        Ok(())
    }

    #[test]
    fn test_load_config_rejects_duplicate_windows() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write(
            dir.path(),
            "dup.yml",
            "session: s\nwindows:\n  - name: a\n  - name: a\n",
        )?;

        let result = load_config(&path, &BTreeMap::new());

        let Err(Error::InvalidConfig(message)) = result else {
            panic!("expected invalid config");
        };
        assert!(message.contains("duplicate window name 'a'"));
        Ok(())
    }

    // ========================================================================
    // Substitution
    // ========================================================================

    #[test]
    fn test_expand_bare_and_braced() {
        let lookup = |name: &str| (name == "x").then(|| "1".to_string());
        assert_eq!(expand("a $x b ${x}c", lookup), "a 1 b 1c");
    }

    #[test]
    fn test_expand_unknown_name_becomes_name() {
        assert_eq!(expand("cd $missing/dir", |_| None), "cd missing/dir");
    }

    #[test]
    fn test_expand_keeps_stray_dollars() {
        assert_eq!(expand("cost: 5$", |_| None), "cost: 5$");
        assert_eq!(expand("$ ls", |_| None), "$ ls");
        assert_eq!(expand("${unterminated", |_| None), "${unterminated");
        assert_eq!(expand("${}", |_| None), "${}");
    }

    #[test]
    fn test_expand_leaves_shell_specials_alone() {
        assert_eq!(
            expand("echo $? $$ $12 ${} done", |_| None),
            "echo $? $$ 12 ${} done"
        );
    }

    #[test]
    fn test_expand_stops_name_at_punctuation() {
        let lookup = |name: &str| (name == "host").then(|| "db".to_string());
        assert_eq!(expand("$host:5432", lookup), "db:5432");
    }

    #[test]
    #[serial]
    fn test_substitute_settings_shadow_environment() {
        std::env::set_var("GMUX_TEST_TARGET", "from-env");
        std::env::set_var("GMUX_TEST_OTHER", "env-only");

        let result = substitute(
            "$GMUX_TEST_TARGET $GMUX_TEST_OTHER",
            &settings(&[("GMUX_TEST_TARGET", "from-settings")]),
        );

        std::env::remove_var("GMUX_TEST_TARGET");
        std::env::remove_var("GMUX_TEST_OTHER");
        assert_eq!(result, "from-settings env-only");
    }

    // ========================================================================
    // Listing
    // ========================================================================

    #[test]
    fn test_list_configs_sorted_stems() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write(dir.path(), "work.yml", "")?;
        write(dir.path(), "blog.yaml", "")?;
        write(dir.path(), "blog.yml", "")?;
        write(dir.path(), "gmux.log", "")?;
        write(dir.path(), "notes.txt", "")?;
        fs::create_dir(dir.path().join("archive.yml"))?;

        assert_eq!(list_configs(dir.path())?, vec!["blog", "work"]);
        Ok(())
    }

    #[test]
    fn test_list_configs_missing_dir_is_empty() -> Result<()> {
        let dir = tempfile::tempdir()?;
        assert!(list_configs(&dir.path().join("absent"))?.is_empty());
        Ok(())
    }

    // ========================================================================
    // Template and editor
    // ========================================================================

    #[test]
    fn test_new_config_writes_loadable_template() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested/work.yml");

        assert!(new_config(&path, "work")?);

        let config: Config = load_config(&path, &BTreeMap::new())?;
        assert_eq!(config.session, "work");
        assert_eq!(config.windows.len(), 2);
        Ok(())
    }

    #[test]
    fn test_new_config_keeps_existing_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write(dir.path(), "work.yml", "session: mine\n")?;

        assert!(!new_config(&path, "work")?);
        assert_eq!(fs::read_to_string(&path)?, "session: mine\n");
        Ok(())
    }

    #[test]
    fn test_template_names_session() {
        assert!(template("blog").starts_with("session: blog\n"));
    }

    #[test]
    #[serial]
    fn test_editor_defaults_to_vim() {
        let saved = std::env::var("EDITOR").ok();
        std::env::remove_var("EDITOR");
        let fallback = editor();
        std::env::set_var("EDITOR", "  ");
        let blank = editor();
        std::env::set_var("EDITOR", "nano");
        let chosen = editor();

        match saved {
            Some(value) => std::env::set_var("EDITOR", value),
            None => std::env::remove_var("EDITOR"),
        }
        assert_eq!(fallback, DEFAULT_EDITOR);
        assert_eq!(blank, DEFAULT_EDITOR);
        assert_eq!(chosen, "nano");
    }

    #[test]
    #[serial]
    fn test_edit_config_runs_editor_attached() -> Result<()> {
        let saved = std::env::var("EDITOR").ok();
        std::env::set_var("EDITOR", "nano");

        let runner = MockRunner::new();
        let result = edit_config(&runner, Path::new("/home/u/.config/gmux/work.yml"));

        match saved {
            Some(value) => std::env::set_var("EDITOR", value),
            None => std::env::remove_var("EDITOR"),
        }
        result?;
        let invocations = runner.invocations();
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].line, "nano /home/u/.config/gmux/work.yml");
        assert!(invocations[0].attached);
        Ok(())
    }
}

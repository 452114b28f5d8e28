use assert_cmd::Command;
use std::path::Path;

pub fn notepad_cmd(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("notepad").unwrap();
    cmd.env_remove("NOTEPAD_DB_PATH");
    cmd.env_remove("NOTEPAD_LOG_LEVEL");
    cmd.env_remove("NOTEPAD_LOG_DIR");
    cmd.arg("--db").arg(db);
    cmd
}

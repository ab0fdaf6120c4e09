#![allow(clippy::unwrap_used, clippy::expect_used)]

// Runs in its own test binary: it changes the working directory and owns the
// process-wide logger.

use asynclog::log::{LogLevel, global};
use std::{env, fs, thread};

#[test]
fn global_logger_is_initialised_once_and_drains_on_stop() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(
        tmp.path().join(".env"),
        "# no Telegram credentials on purpose\nLOG_DIRECTORY=global-logs\n",
    )
    .unwrap();
    env::set_current_dir(tmp.path()).unwrap();

    let addrs: Vec<usize> = (0..8)
        .map(|_| thread::spawn(|| global::global().map(|l| l as *const _ as usize)))
        .collect::<Vec<_>>()
        .into_iter()
        .map(|t| t.join().unwrap().expect("global logger started"))
        .collect();
    assert!(addrs.windows(2).all(|w| w[0] == w[1]));

    let logger = global::global().unwrap();
    assert!(tmp.path().join("global-logs").is_dir());

    for i in 0..100 {
        global::log(LogLevel::Info, format!("g{i}"));
    }
    global::stop_global();
    global::stop_global();
    assert!(logger.is_stopped());

    let files: Vec<_> = fs::read_dir(tmp.path().join("global-logs"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    let total: usize = files
        .iter()
        .map(|p| fs::read_to_string(p).unwrap().lines().count())
        .sum();
    assert_eq!(total, 100);
}

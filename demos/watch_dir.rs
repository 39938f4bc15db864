//! # Example: watch_dir
//!
//! Prints `Changed` every time something under a directory changes.
//!
//! A [`ChangeSource`] fed by a `notify` watcher plays the token producer; the
//! subscription renews its token after every change, so each one is printed.
//!
//! ## Flow
//! ```text
//! notify watcher ──(fs event)──► source.notify() ──► armed token fires
//!                                                       ├─► producer() → fresh token
//!                                                       ├─► println!("Changed")
//!                                                       └─► arm fresh token
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=rearm=debug cargo run --example watch_dir -- /path/to/dir
//! ```

use std::path::PathBuf;

use notify::{RecursiveMode, Watcher};
use rearm::{ChangeSource, Subscription};
use tracing::warn;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let source = ChangeSource::shared();
    let fs_source = source.clone();
    let mut watcher =
        notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| match res {
            Ok(_) => {
                fs_source.notify();
            }
            Err(e) => warn!(error = %e, "filesystem watcher error"),
        })?;
    watcher.watch(&dir, RecursiveMode::Recursive)?;

    let sub = Subscription::builder()
        .name("watch_dir")
        .producer(source.producer())
        .consumer(|_: &()| println!("Changed"))
        .build()?;

    println!("watching {} (press Enter to quit)", dir.display());
    std::io::stdin().read_line(&mut String::new())?;

    sub.dispose();
    Ok(())
}

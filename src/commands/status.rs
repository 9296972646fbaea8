use anyhow::Result;

use super::config::Config;
use crate::{marker::MarkerStore, runtime::Runtime};

/// Print the last relocated URL of each package.
#[tracing::instrument(skip(config))]
pub fn status<R: Runtime>(config: Config<R>, names: &[String]) -> Result<()> {
    let markers = config.marker_store();
    for line in status_lines(&markers, names)? {
        println!("{}", line);
    }
    Ok(())
}

pub fn status_lines<M: MarkerStore>(markers: &M, names: &[String]) -> Result<Vec<String>> {
    names
        .iter()
        .map(|name| {
            Ok(match markers.read_last_url(name)? {
                Some(url) => format!("{} {}", name, url),
                None => format!("{} (never relocated)", name),
            })
        })
        .collect()
}

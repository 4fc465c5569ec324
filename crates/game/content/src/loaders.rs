//! RON catalog loaders.
//!
//! A world directory holds one `catalog.ron` describing a full
//! [`ContentBundle`]. Loading validates the bundle before handing it out so
//! a malformed catalog fails at startup, not mid-battle.

use std::fs;
use std::path::Path;

use anyhow::{Context, bail};

use crate::ContentBundle;

/// Parse a bundle from RON text.
pub fn from_ron_str(text: &str) -> anyhow::Result<ContentBundle> {
    let bundle: ContentBundle = ron::from_str(text).context("parsing catalog RON")?;
    if let Err(reason) = bundle.validate() {
        bail!("invalid catalog: {reason}");
    }
    Ok(bundle)
}

/// Load `catalog.ron` from a world directory.
pub fn load_dir(dir: &Path) -> anyhow::Result<ContentBundle> {
    let path = dir.join("catalog.ron");
    let text = fs::read_to_string(&path)
        .with_context(|| format!("reading catalog from {}", path.display()))?;
    from_ron_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;

    #[test]
    fn builtin_round_trips_through_ron() {
        let text = ron::to_string(&builtin()).expect("serialize");
        let bundle = from_ron_str(&text).expect("parse");
        assert_eq!(bundle, builtin());
    }

    #[test]
    fn load_dir_reads_catalog_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let text = ron::to_string(&builtin()).expect("serialize");
        std::fs::write(dir.path().join("catalog.ron"), text).expect("write");
        let bundle = load_dir(dir.path()).expect("load");
        assert_eq!(bundle.realms.len(), builtin().realms.len());
    }

    #[test]
    fn empty_ladder_is_rejected() {
        let mut bundle = builtin();
        bundle.realms.clear();
        let text = ron::to_string(&bundle).expect("serialize");
        assert!(from_ron_str(&text).is_err());
    }
}

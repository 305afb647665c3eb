use anyhow::Result;

use crate::config::Config;
use crate::storage::PageStore;

/// Remove all pages whose title contains the given fragment
pub async fn curate(config: Config, fragment: String) -> Result<()> {
    let store = PageStore::new(&config.corpus.corpus_path);
    let removed = store.curate(&fragment)?;

    println!(
        "Removed {} page(s) with '{}' in the title from {}",
        removed,
        fragment,
        config.corpus.corpus_path.display()
    );

    Ok(())
}

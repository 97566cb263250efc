use crate::cli::Context;
use crate::error::Result;
use crate::settings::settings_path;
use crate::store::CategoryStore;

pub fn run(ctx: &Context) -> Result<()> {
    println!("Settings:   {}", settings_path().display());
    println!("Data dir:   {}", ctx.settings.data_dir);
    println!("Currency:   {}", ctx.settings.currency);
    println!("Store:      {}", ctx.store_path.display());

    if !ctx.store_path.exists() {
        println!();
        println!("Category store not found. Run `pesa init` to set up.");
        return Ok(());
    }

    let store = CategoryStore::open(&ctx.store_path)?;
    let keywords: usize = store.iter().map(|(_, kws)| kws.len()).sum();

    println!();
    println!("Categories:    {}", store.len());
    println!("Keywords:      {keywords}");
    Ok(())
}

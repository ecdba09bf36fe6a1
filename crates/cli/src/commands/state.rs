//! Raw persisted-state commands.
//!
//! # Usage
//!
//! ```bash
//! unidemy state show     # pretty-print the stored blob
//! unidemy state reset    # delete it and start over
//! ```

use unidemy_storefront::Store;

use super::CommandError;

/// Print the blob currently stored in the durable slot.
///
/// # Errors
///
/// Returns an error if the slot can't be read or holds invalid JSON.
#[allow(clippy::print_stdout)]
pub fn show(store: &Store) -> Result<(), CommandError> {
    match store.read_persisted()? {
        Some(persisted) => println!("{}", serde_json::to_string_pretty(&persisted)?),
        None => println!("Nothing stored under {:?}", store.storage_key()),
    }
    Ok(())
}

/// Delete the stored blob and reset to an empty, signed-out state.
///
/// # Errors
///
/// Returns an error if the slot can't be removed.
pub fn reset(store: &Store) -> Result<(), CommandError> {
    store.reset()?;
    tracing::info!("Stored state removed");
    Ok(())
}

//! Signatures command implementation.

use std::path::Path;

use anyhow::Result;
use hotbar::{builtin_signatures, save_signatures};

/// Print the builtin signature set, or save it to `output`
pub fn run(output: Option<&Path>) -> Result<()> {
    let signatures = builtin_signatures();

    if let Some(path) = output {
        save_signatures(path, &signatures)?;
        println!("Signatures saved to: {}", path.display());
    } else {
        println!("{}", serde_json::to_string_pretty(&signatures)?);
    }

    Ok(())
}

//! Persona commands.

use std::io::Write;

use campusnavi_core::Persona;

use crate::error::ClientResult;

/// Lists the personas offered in the picker.
pub fn list<W: Write>(out: &mut W) -> ClientResult<()> {
    for persona in Persona::PICKER {
        writeln!(
            out,
            "{:<8} {} ({}): {}",
            persona.id(),
            persona.display_name(),
            persona.role(),
            persona.description()
        )?;
    }
    Ok(())
}

/// Prints the system prompt of persona `id`.
pub fn show<W: Write>(id: &str, out: &mut W) -> ClientResult<()> {
    let persona: Persona = id.parse()?;
    writeln!(out, "{}", persona.system_prompt())?;
    Ok(())
}

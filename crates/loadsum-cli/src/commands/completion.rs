use anyhow::Result;
use clap::Command;
use clap_complete::{Shell, generate};
use std::io::{self, Write};

/// Print the completion script for `shell`
pub fn execute(shell: Shell, cmd: &mut Command) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write_script(shell, cmd, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Render the completion script for `cmd` into `out`
pub fn write_script<W: Write>(shell: Shell, cmd: &mut Command, out: &mut W) -> Result<()> {
    let bin_name = cmd.get_name().to_string();
    tracing::debug!("Generating {} completions for {}", shell, bin_name);
    generate(shell, cmd, bin_name, out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Arg;

    #[test]
    fn test_write_script_uses_command_name() {
        let mut cmd = Command::new("loadsum").subcommand(
            Command::new("generate").arg(Arg::new("path").required(true)),
        );
        let mut buf = Vec::new();

        write_script(Shell::Fish, &mut cmd, &mut buf).unwrap();

        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("complete -c loadsum"));
    }
}

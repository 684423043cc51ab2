use anyhow::Result;

fn main() -> Result<()> {
    ies_cli::main_entry()
}

//! Print command implementation.

use anyhow::{Context, Result};
use envchain_environment::{DefinitionBuilder, VariableMap};

use crate::args::PrintFormat;

pub fn run(map: &VariableMap, format: PrintFormat) -> Result<()> {
    print!("{}", render(map, format)?);
    Ok(())
}

fn render(map: &VariableMap, format: PrintFormat) -> Result<String> {
    let output = match format {
        PrintFormat::Dotenv => DefinitionBuilder::dotenv().build_map(map),
        PrintFormat::Export => DefinitionBuilder::shell_export().build_map(map),
        PrintFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(map).context("Failed to serialize variables")?;
            json.push('\n');
            json
        }
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VariableMap {
        [("NAME", "\"envchain\""), ("HOME", "/srv")].into_iter().collect()
    }

    #[test]
    fn test_render_dotenv_and_export() {
        assert_eq!(
            render(&sample(), PrintFormat::Dotenv).unwrap(),
            "HOME=/srv\nNAME=\"envchain\"\n"
        );
        assert_eq!(
            render(&sample(), PrintFormat::Export).unwrap(),
            "export HOME=/srv\nexport NAME=\"envchain\"\n"
        );
    }

    #[test]
    fn test_render_json() {
        let out = render(&sample(), PrintFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["HOME"], "/srv");
        assert_eq!(value["NAME"], "\"envchain\"");
    }
}

use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::io::config_io;
use crate::model::config::TrackerConfig;

pub fn cmd_init(config_path: &Path, args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    config_io::write_template(config_path, args.force)?;
    println!("Wrote {}", config_path.display());
    Ok(())
}

/// Names the config refers to that the catalog lacks, formatted for output
fn unknown_name_lines(config: &TrackerConfig) -> Vec<String> {
    config
        .unknown_item_names()
        .into_iter()
        .map(|(place, name)| format!("  {place}: {name:?} is not in the item catalog"))
        .collect()
}

pub fn cmd_check(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::load_config(config_path)?;
    let problems = unknown_name_lines(&config);

    println!(
        "{}: {} items, {} key bindings, {} locations",
        config_path.display(),
        config.items.len(),
        config.binds.len(),
        config.hint_tracker.locations.len()
    );
    if problems.is_empty() {
        println!("OK");
        return Ok(());
    }
    for line in &problems {
        eprintln!("{line}");
    }
    Err(format!("{} unknown item name(s)", problems.len()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_config_has_no_unknown_names() {
        let config = TrackerConfig::builtin().unwrap();
        assert!(unknown_name_lines(&config).is_empty());
    }

    #[test]
    fn unknown_names_are_listed() {
        let config = TrackerConfig::from_toml(
            "[item_tracker]\nmedallion_order = [\"Light Medallion\"]\n",
        )
        .unwrap();
        assert_eq!(
            unknown_name_lines(&config),
            vec!["  medallion order: \"Light Medallion\" is not in the item catalog".to_string()]
        );
    }
}

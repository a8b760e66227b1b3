use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use serde_json::Value;

use cask_sdk::Cask;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let cask = Cask::open(&cli.store)
        .with_context(|| format!("opening store at {}", cli.store.display()))?;

    match cli.command {
        Command::Publish(args) => cmd_publish(&cask, args),
        Command::Put(args) => cmd_put(&cask, args),
        Command::Get(args) => cmd_get(&cask, args),
        Command::Link(args) => cmd_link(&cask, args),
        Command::Pair(args) => cmd_pair(&cask, args),
        Command::Stats(_) => cmd_stats(&cask),
    }
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn cmd_publish(cask: &Cask, args: PublishArgs) -> anyhow::Result<()> {
    let metadata = read_json(&args.metadata)?;
    let roles = read_json(&args.roles)?;

    let script = cask.publish(&metadata, &roles)?;
    println!(
        "{} Published {}",
        "✓".green().bold(),
        script.to_string().yellow().bold()
    );
    println!("  metadata: {}", script.metadata_id.to_string().yellow());
    println!("  roles:    {}", script.roles_id.to_string().yellow());
    Ok(())
}

fn cmd_put(cask: &Cask, args: PutArgs) -> anyhow::Result<()> {
    let payload = read_json(&args.file)?;
    let id = cask.store_payload(args.category, &payload)?;
    println!(
        "{} Stored {} document as {}",
        "✓".green().bold(),
        args.category,
        id.to_string().yellow().bold()
    );
    Ok(())
}

fn cmd_get(cask: &Cask, args: GetArgs) -> anyhow::Result<()> {
    match cask.fetch_payload(args.category, &args.id)? {
        Some(payload) => {
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(())
        }
        None => bail!("no {} record with id {}", args.category, args.id),
    }
}

fn cmd_link(cask: &Cask, args: LinkArgs) -> anyhow::Result<()> {
    cask.register_link(&args.metadata_id, &args.roles_id)?;
    println!(
        "{} Linked {} ↔ {}",
        "✓".green().bold(),
        args.metadata_id.to_string().yellow(),
        args.roles_id.to_string().yellow()
    );
    Ok(())
}

fn cmd_pair(cask: &Cask, args: PairArgs) -> anyhow::Result<()> {
    match cask.fetch_script(&args.script)? {
        Some(script) => {
            println!("{}", "metadata:".bold());
            println!("{}", serde_json::to_string_pretty(&script.metadata)?);
            println!("{}", "roles:".bold());
            println!("{}", serde_json::to_string_pretty(&script.roles)?);
            Ok(())
        }
        None => bail!("no script published as {}", args.script),
    }
}

fn cmd_stats(cask: &Cask) -> anyhow::Result<()> {
    let stats = cask.stats()?;
    println!(
        "metadata: {} records (id length {})",
        stats.metadata_records.to_string().bold(),
        stats.metadata_id_length
    );
    println!(
        "roles:    {} records (id length {})",
        stats.roles_records.to_string().bold(),
        stats.roles_id_length
    );
    println!("links:    {}", stats.links.to_string().bold());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cask_types::Category;

    #[test]
    fn publish_then_pair_through_a_store_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("cask.journal");

        let metadata_path = dir.path().join("meta.json");
        let roles_path = dir.path().join("roles.json");
        fs::write(&metadata_path, r#"{"name":"Trouble Brewing"}"#).unwrap();
        fs::write(&roles_path, r#"{"roles":["washerwoman"]}"#).unwrap();

        let cask = Cask::open(&store).unwrap();
        cmd_publish(
            &cask,
            PublishArgs {
                metadata: metadata_path,
                roles: roles_path,
            },
        )
        .unwrap();

        let stats = cask.stats().unwrap();
        assert_eq!(stats.metadata_records, 1);
        assert_eq!(stats.roles_records, 1);
        assert_eq!(stats.links, 1);
    }

    #[test]
    fn get_missing_record_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cask = Cask::open(&dir.path().join("cask.journal")).unwrap();

        let result = cmd_get(
            &cask,
            GetArgs {
                category: Category::Metadata,
                id: "zz".parse().unwrap(),
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn read_json_rejects_invalid_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{nope").unwrap();
        assert!(read_json(&path).is_err());
    }
}

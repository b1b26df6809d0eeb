//! Schema command - print the search port contract

use clap::Args;

use crate::contract::ContractSchema;

#[derive(Args)]
pub struct SchemaArgs {
    /// Print the contract as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: SchemaArgs) -> anyhow::Result<()> {
    let schema = ContractSchema::search_port();

    if args.json {
        println!("{}", serde_json::to_string_pretty(schema)?);
        return Ok(());
    }

    println!("Search port ({} operations):", schema.len());
    for signature in schema.iter() {
        println!(
            "  {}({}) -> promise<{}>",
            signature.operation, signature.args, signature.result
        );
    }

    Ok(())
}

//! CEP commands.

use anyhow::Result;
use serde_json::json;

use product_page::LookupError;
use vitrine_commerce::{format_postal_code, postal_code_digits, standard_options, Address, PostalCode};
use vitrine_data::{LookupOutcome, PostalLookup};

use super::{CepArgs, CepCommand};
use crate::context::Context;

/// Run the cep command.
pub async fn run(args: CepArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CepCommand::Format { input } => format_cep(&input, ctx),
        CepCommand::Lookup { cep } => lookup_cep(&cep, ctx).await,
    }
}

fn format_cep(input: &str, ctx: &Context) -> Result<()> {
    let formatted = format_postal_code(input);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "input": input,
            "formatted": formatted,
            "digits": postal_code_digits(input),
            "valid": PostalCode::parse(input).is_ok(),
        }));
    } else {
        println!("{}", formatted);
    }

    Ok(())
}

async fn lookup_cep(input: &str, ctx: &Context) -> Result<()> {
    let code = PostalCode::parse(input).map_err(LookupError::from)?;
    let client = ctx.config.page.lookup_client();
    ctx.output.debug(&format!("GET {}", client.url_for(&code)));

    let spinner = ctx
        .output
        .spinner(&format!("Buscando CEP {}...", code.formatted()));
    let outcome = client.lookup(&code).await;
    spinner.finish_and_clear();

    match outcome {
        LookupOutcome::Found(address) => {
            print_address(&address, ctx);
            Ok(())
        }
        LookupOutcome::NotFound => Err(LookupError::NotFound.into()),
        LookupOutcome::Failed(err) => Err(LookupError::Failed(err).into()),
    }
}

/// Print a resolved address with its shipping estimates.
pub fn print_address(address: &Address, ctx: &Context) {
    let options = standard_options();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "address": address,
            "shipping": options,
        }));
        return;
    }

    ctx.output.success("Endereço encontrado:");
    ctx.output.kv("Endereço", &address.street_line());
    ctx.output.kv("Cidade", &address.city_line());
    ctx.output.kv("CEP", &address.postal_code);
    for option in &options {
        ctx.output
            .list_item(&format!("{}: {}", option.name, option.estimate()));
    }
}

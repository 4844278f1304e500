//! Product page commands.
//!
//! Each invocation mounts the page from the snapshot file, applies one
//! interaction and lets the page save itself.

use std::fs;

use anyhow::{bail, Context as _, Result};
use chrono::{Duration, Utc};
use dialoguer::{Confirm, Select};
use serde::Serialize;

use product_page::ProductPage;
use vitrine_cache::{FileStore, SystemClock};
use vitrine_commerce::{Address, ShippingOption};

use super::cep::print_address;
use super::{PageArgs, PageCommand, QtyStep};
use crate::context::Context;
use crate::output::on_off;

type Page = ProductPage<FileStore, SystemClock>;

/// Expiry times past this many minutes (about a century) are not shown.
const MAX_TTL_MINUTES: i64 = 100 * 365 * 24 * 60;

/// Run the page command.
pub async fn run(args: PageArgs, ctx: &Context) -> Result<()> {
    let mut page = ctx.mount_page();

    match args.command {
        PageCommand::Show {
            html,
            output,
            gallery,
        } => {
            if gallery {
                page.open_gallery();
            }
            if html {
                render_html(&page, output.as_deref(), ctx)
            } else {
                show_summary(&page, ctx);
                Ok(())
            }
        }
        PageCommand::Image { target } => {
            move_image(&mut page, &target)?;
            show_summary(&page, ctx);
            Ok(())
        }
        PageCommand::Size { size } => {
            let size = match size {
                Some(size) => size,
                None => {
                    let sizes = &page.product().sizes;
                    prompt_choice("Tamanho", sizes, page.selection().size(), ctx)?
                }
            };
            if !page.product().has_size(&size) {
                bail!(
                    "Unknown size '{}'. Available: {}",
                    size,
                    page.product().sizes.join(", ")
                );
            }
            page.select_size(&size);
            show_summary(&page, ctx);
            Ok(())
        }
        PageCommand::Color { color } => {
            let names: Vec<String> = page
                .product()
                .colors
                .iter()
                .map(|c| c.name.clone())
                .collect();
            let color = match color {
                Some(color) => color,
                None => prompt_choice("Cor", &names, page.selection().color(), ctx)?,
            };
            if page.product().color(&color).is_none() {
                bail!("Unknown color '{}'. Available: {}", color, names.join(", "));
            }
            page.select_color(&color);
            show_summary(&page, ctx);
            Ok(())
        }
        PageCommand::Qty { step } => {
            match step {
                QtyStep::Inc => page.increment_quantity(),
                QtyStep::Dec => page.decrement_quantity(),
            };
            show_summary(&page, ctx);
            Ok(())
        }
        PageCommand::Favorite => {
            page.toggle_favorite();
            show_summary(&page, ctx);
            Ok(())
        }
        PageCommand::Cep { value, lookup } => enter_cep(&mut page, &value, lookup, ctx).await,
        PageCommand::Reset { yes } => reset(&mut page, yes, ctx),
    }
}

fn move_image(page: &mut Page, target: &str) -> Result<()> {
    match target {
        "next" => {
            page.next_image();
        }
        "prev" | "previous" => {
            page.previous_image();
        }
        index => {
            let index: usize = index
                .parse()
                .with_context(|| format!("Expected next, prev or an index, got '{}'", index))?;
            page.select_image(index);
        }
    }
    Ok(())
}

fn prompt_choice(
    prompt: &str,
    items: &[String],
    current: Option<&str>,
    ctx: &Context,
) -> Result<String> {
    if !ctx.output.is_interactive() {
        bail!("{} required. Available: {}", prompt, items.join(", "));
    }

    let default = current
        .and_then(|current| items.iter().position(|item| item == current))
        .unwrap_or(0);
    let chosen = Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()?;

    Ok(items[chosen].clone())
}

async fn enter_cep(page: &mut Page, value: &str, lookup: bool, ctx: &Context) -> Result<()> {
    page.edit_postal_code(value);
    ctx.output
        .debug(&format!("CEP field: {}", page.shipping().postal_code()));

    if !lookup {
        show_summary(page, ctx);
        return Ok(());
    }

    let client = ctx.config.page.lookup_client();
    let spinner = ctx
        .output
        .spinner(&format!("Buscando CEP {}...", page.shipping().postal_code()));
    let result = page.search_postal_code(&client).await;
    spinner.finish_and_clear();

    let address = result?;
    print_address(&address, ctx);
    Ok(())
}

fn reset(page: &mut Page, yes: bool, ctx: &Context) -> Result<()> {
    if !yes && ctx.output.is_interactive() {
        let confirmed = Confirm::new()
            .with_prompt("Forget the saved selection?")
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Reset cancelled");
            return Ok(());
        }
    }

    page.reset();
    ctx.output.success("Selection cleared");
    Ok(())
}

fn render_html(page: &Page, output: Option<&str>, ctx: &Context) -> Result<()> {
    let html = page.render();
    match output {
        Some(path) => {
            let path = ctx.resolve_path(path);
            fs::write(&path, html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            ctx.output.success(&format!("Wrote {}", path.display()));
        }
        None => println!("{}", html),
    }
    Ok(())
}

/// What `page show` reports.
#[derive(Debug, Serialize)]
struct PageSummary<'a> {
    product: &'a str,
    price: String,
    image: usize,
    image_count: usize,
    size: Option<&'a str>,
    color: Option<&'a str>,
    quantity: u32,
    favorite: bool,
    cep: &'a str,
    address: Option<&'a Address>,
    error: Option<String>,
    shipping: Vec<ShippingOption>,
    can_purchase: bool,
    gallery_open: bool,
    expires_at: Option<String>,
}

impl<'a> PageSummary<'a> {
    fn of(page: &'a Page, ttl_minutes: u64) -> Self {
        let selection = page.selection();
        let expires_at = i64::try_from(ttl_minutes)
            .ok()
            .filter(|minutes| *minutes <= MAX_TTL_MINUTES)
            .and_then(|minutes| Utc::now().checked_add_signed(Duration::minutes(minutes)))
            .map(|at| at.to_rfc3339());
        Self {
            product: &page.product().name,
            price: page.product().price.display(),
            image: selection.image_index(),
            image_count: selection.image_count(),
            size: selection.size(),
            color: selection.color(),
            quantity: selection.quantity(),
            favorite: selection.is_favorite(),
            cep: page.shipping().postal_code(),
            address: page.shipping().address(),
            error: page.shipping().error().map(ToString::to_string),
            shipping: page.shipping_options(),
            can_purchase: page.can_purchase(),
            gallery_open: page.is_gallery_open(),
            expires_at,
        }
    }
}

fn show_summary(page: &Page, ctx: &Context) {
    let summary = PageSummary::of(page, ctx.config.page.ttl_minutes);

    if ctx.output.is_json() {
        ctx.output.json(&summary);
        return;
    }

    ctx.output.header(summary.product);
    ctx.output.kv("Preço", &summary.price);
    ctx.output.kv(
        "Imagem",
        &format!("{}/{}", summary.image + 1, summary.image_count),
    );
    ctx.output.kv("Tamanho", summary.size.unwrap_or("Selecione"));
    ctx.output.kv("Cor", summary.color.unwrap_or("Selecione"));
    ctx.output.kv("Quantidade", &summary.quantity.to_string());
    ctx.output.kv("Favorito", on_off(summary.favorite));
    if !summary.cep.is_empty() {
        ctx.output.kv("CEP", summary.cep);
    }
    if let Some(address) = summary.address {
        ctx.output.kv("Endereço", &address.street_line());
        ctx.output.kv("Cidade", &address.city_line());
        for option in &summary.shipping {
            ctx.output
                .list_item(&format!("{}: {}", option.name, option.estimate()));
        }
    }
    if let Some(error) = &summary.error {
        ctx.output.warn(error);
    }
    ctx.output.kv(
        "Compra",
        if summary.can_purchase {
            "liberada"
        } else {
            "selecione tamanho e cor"
        },
    );
    if let Some(expires_at) = &summary.expires_at {
        ctx.output.debug(&format!("Seleção salva até {}", expires_at));
    }
}

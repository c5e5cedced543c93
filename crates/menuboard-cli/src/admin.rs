//! Admin subcommands over the publish pipeline

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{Local, TimeZone};

use menuboard_client::{
    DocumentCache, HttpMenuRemote, ProfileStore, PublishError, PublishPipeline, SyncOutcome,
};
use menuboard_core::{AnimationStyle, Dish, DishBadge, DishStatus, Promotion, Theme};
use menuboard_security::PasswordService;
use menuboard_shared::config::ClientConfig;

use crate::cli::{AiCommand, CategoryCommand, Commands, DishCommand, PromoCommand};

type Pipeline = PublishPipeline<HttpMenuRemote>;

pub async fn run(command: Commands, config: &ClientConfig) -> anyhow::Result<()> {
    let remote = Arc::new(HttpMenuRemote::new(Duration::from_secs(config.request_timeout_seconds)));
    let pipeline = PublishPipeline::open(
        remote,
        DocumentCache::new(config.draft_path()),
        ProfileStore::new(config.profile_path()),
    )
    .await;

    match command {
        Commands::Login { password } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Password: ")?,
            };
            pipeline.login(&password).await.map_err(explain)?;
            println!("Logged in.");
        }
        Commands::Logout => {
            pipeline.logout().await?;
            println!("Session cleared.");
        }
        Commands::Endpoint { url } => match pipeline.set_endpoint(&url).await? {
            Some(outcome) => report_sync(&outcome),
            None => println!("Endpoint unchanged."),
        },
        Commands::Pull => report_sync(&pipeline.pull().await),
        Commands::Status => status(&pipeline).await,
        Commands::Publish => {
            let published = pipeline.publish().await.map_err(explain)?;
            println!("Published version {}.", format_version(published.last_updated));
        }
        Commands::Dish { action } => dish(&pipeline, action).await?,
        Commands::Category { action } => category(&pipeline, action).await?,
        Commands::Promo { action } => promo(&pipeline, action).await?,
        Commands::Theme { name } => {
            let theme = Theme::from_str(&name).ok_or_else(|| anyhow!("Unknown theme: {}", name))?;
            pipeline.set_theme(theme).await?;
            println!("Theme set to {}.", theme.as_str());
        }
        Commands::Footer { message } => {
            pipeline.set_footer_message(&message).await?;
            println!("Footer updated.");
        }
        Commands::Upload { file, dish } => upload(&pipeline, &file, dish).await?,
        Commands::Ai { action } => ai(&pipeline, action).await?,
        Commands::Display | Commands::HashPassword { .. } => bail!("not an admin command"),
    }
    Ok(())
}

pub fn hash_password(password: &str) -> anyhow::Result<()> {
    println!("{}", PasswordService::hash(password)?);
    Ok(())
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Turn a publish failure into the next step for the operator.
fn explain(err: PublishError) -> anyhow::Error {
    match err {
        PublishError::NoEndpoint => anyhow!("{}. Run `menuboard endpoint <url>` first.", err),
        e if e.requires_login() => anyhow!("{}. Run `menuboard login`.", e),
        e if e.is_retryable() => anyhow!("{}. The draft is kept, try again later.", e),
        e => anyhow!(e),
    }
}

fn format_version(version: Option<i64>) -> String {
    version
        .and_then(|ms| Local.timestamp_millis_opt(ms).single())
        .map(|at| format!("{} ({})", version.unwrap_or_default(), at.format("%Y-%m-%d %H:%M:%S")))
        .unwrap_or_else(|| "never published".to_string())
}

fn report_sync(outcome: &SyncOutcome) {
    match outcome {
        SyncOutcome::Updated { version, source } => {
            println!("Draft replaced from {:?}: version {}.", source, format_version(*version))
        }
        SyncOutcome::Unchanged => println!("Draft already up to date."),
        SyncOutcome::Superseded => println!("A newer sync already applied."),
    }
}

async fn status(pipeline: &Pipeline) {
    let profile = pipeline.profile().await;
    let draft = pipeline.draft().await;

    println!("Endpoint:  {}", profile.endpoint().unwrap_or("(not set)"));
    let session = match profile.session() {
        None => "not logged in".to_string(),
        Some(s) if s.is_expired() => "expired".to_string(),
        Some(s) => match s.expires_at().and_then(|exp| Local.timestamp_opt(exp, 0).single()) {
            Some(at) => format!("valid until {}", at.format("%Y-%m-%d %H:%M")),
            None => "valid".to_string(),
        },
    };
    println!("Session:   {}", session);
    println!("Version:   {}", format_version(draft.last_updated));
    println!(
        "Draft:     {}",
        if profile.has_unsaved_changes { "unsaved changes" } else { "clean" }
    );
    println!(
        "Contents:  {} categories, {} dishes, {} promotions ({} active), theme {}",
        draft.categories.len(),
        draft.dishes.len(),
        draft.promotions.len(),
        draft.active_promotions().len(),
        draft.theme.as_str()
    );
}

async fn dish(pipeline: &Pipeline, action: DishCommand) -> anyhow::Result<()> {
    match action {
        DishCommand::List => {
            let draft = pipeline.draft().await;
            let mut categories: Vec<_> = draft.categories.iter().collect();
            categories.sort_by_key(|c| c.order);
            for category in categories {
                let hidden = if category.is_visible { "" } else { " (hidden)" };
                println!("[{}] {}{}", category.id, category.name, hidden);
                let mut dishes: Vec<_> = draft.dishes.iter().filter(|d| d.category == category.id).collect();
                dishes.sort_by_key(|d| d.order);
                for d in dishes {
                    println!(
                        "    {:<10} {:<32} {:>6} ₽  {}",
                        d.id,
                        d.name,
                        d.effective_price(),
                        d.status.as_str()
                    );
                }
            }
        }
        DishCommand::Add {
            name,
            category,
            price,
            id,
            discount,
            description,
            badge,
            status,
            order,
            image,
        } => {
            let draft = pipeline.draft().await;
            if draft.category(&category).is_none() {
                println!("Warning: category {} does not exist, the dish will not be shown.", category);
            }

            let existing = id.as_deref().and_then(|id| draft.dish(id)).cloned();
            let default_order = draft.dishes.iter().filter(|d| d.category == category).count() as i32 + 1;
            let mut dish = existing.unwrap_or_else(|| {
                Dish::new(name.clone(), category.clone(), price, order.unwrap_or(default_order))
            });
            if let Some(id) = id {
                dish.id = id;
            }
            dish.name = name.trim().to_string();
            dish.category = category;
            dish.price = price;
            dish.discount_price = discount;
            dish.description = description;
            dish.badge = DishBadge::from_str(&badge).ok_or_else(|| anyhow!("Unknown badge: {}", badge))?;
            dish.status = DishStatus::from_str(&status).ok_or_else(|| anyhow!("Unknown status: {}", status))?;
            if let Some(order) = order {
                dish.order = order;
            }
            if image.is_some() {
                dish.image_url = image;
            }

            let dish_id = dish.id.clone();
            let replaced = pipeline.upsert_dish(dish).await?;
            println!("{} dish {}.", if replaced { "Updated" } else { "Added" }, dish_id);
        }
        DishCommand::Remove { id } => match pipeline.remove_dish(&id).await? {
            Some(d) => println!("Removed {}.", d.name),
            None => bail!("No dish with id {}", id),
        },
    }
    Ok(())
}

async fn category(pipeline: &Pipeline, action: CategoryCommand) -> anyhow::Result<()> {
    match action {
        CategoryCommand::Add { name } => {
            let category = pipeline.add_category(&name).await?;
            println!("Added category {} ({}).", category.name, category.id);
        }
        CategoryCommand::Remove { id } => match pipeline.remove_category(&id).await? {
            Some(c) => println!("Removed {}. Its dishes stay in the draft.", c.name),
            None => bail!("No category with id {}", id),
        },
        CategoryCommand::Toggle { id } => match pipeline.toggle_category(&id).await? {
            Some(true) => println!("Category {} is visible.", id),
            Some(false) => println!("Category {} is hidden.", id),
            None => bail!("No category with id {}", id),
        },
    }
    Ok(())
}

async fn promo(pipeline: &Pipeline, action: PromoCommand) -> anyhow::Result<()> {
    match action {
        PromoCommand::Add {
            title,
            description,
            style,
            duration,
            image,
        } => {
            let style = AnimationStyle::from_str(&style).ok_or_else(|| anyhow!("Unknown style: {}", style))?;
            let mut promotion = Promotion::new(title, description, style);
            if let Some(duration) = duration {
                promotion.duration = duration;
            }
            promotion.image_url = image;
            let id = promotion.id.clone();
            pipeline.upsert_promotion(promotion).await?;
            println!("Added promotion {}.", id);
        }
        PromoCommand::Remove { id } => match pipeline.remove_promotion(&id).await? {
            Some(p) => println!("Removed {}.", p.title),
            None => bail!("No promotion with id {}", id),
        },
        PromoCommand::Toggle { id } => match pipeline.toggle_promotion(&id).await? {
            Some(active) => println!("Promotion {} is {}.", id, if active { "active" } else { "inactive" }),
            None => bail!("No promotion with id {}", id),
        },
    }
    Ok(())
}

/// `data:<mime>;base64,<payload>` for a local file.
fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

async fn upload(pipeline: &Pipeline, file: &Path, dish_id: Option<String>) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let mime = mime_guess::from_path(file).first_or_octet_stream();

    let url = pipeline
        .upload_image(&data_url(mime.essence_str(), &bytes))
        .await
        .map_err(explain)?;
    println!("Uploaded: {}", url);

    if let Some(id) = dish_id {
        set_dish_image(pipeline, &id, url).await?;
    }
    Ok(())
}

async fn set_dish_image(pipeline: &Pipeline, id: &str, url: String) -> anyhow::Result<()> {
    let mut dish = pipeline
        .draft()
        .await
        .dish(id)
        .cloned()
        .ok_or_else(|| anyhow!("No dish with id {}", id))?;
    dish.image_url = Some(url);
    pipeline.upsert_dish(dish).await?;
    println!("Image attached to dish {}.", id);
    Ok(())
}

async fn ai(pipeline: &Pipeline, action: AiCommand) -> anyhow::Result<()> {
    match action {
        AiCommand::Describe { dish: id } => {
            let mut dish = pipeline
                .draft()
                .await
                .dish(&id)
                .cloned()
                .ok_or_else(|| anyhow!("No dish with id {}", id))?;
            match pipeline.improve_description(&dish.name, &dish.description).await {
                Some(text) => {
                    println!("{}", text);
                    dish.description = text;
                    pipeline.upsert_dish(dish).await?;
                }
                None => println!("No new description, the dish is unchanged."),
            }
        }
        AiCommand::Image { dish: id } => {
            let dish = pipeline
                .draft()
                .await
                .dish(&id)
                .cloned()
                .ok_or_else(|| anyhow!("No dish with id {}", id))?;
            match pipeline.generate_image(&dish.name, &dish.description).await {
                Some(url) => {
                    println!("Generated: {}", url);
                    set_dish_image(pipeline, &id, url).await?;
                }
                None => println!("No image generated, the dish is unchanged."),
            }
        }
    }
    Ok(())
}

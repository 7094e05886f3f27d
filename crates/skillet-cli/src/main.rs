use anyhow::{anyhow, bail, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use skillet_core::{
    share, ContactClient, ContactMessage, ContactStatus, Difficulty, Event, ListViewModel,
    MovePolicy, Recipe, RecipeForm, SortOption, StoreConfig, ViewState,
    DEFAULT_PAGE_SIZE,
};

#[derive(Parser)]
#[command(name = "skillet", version, about = "Recipe list client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a page of recipes and print the derived view
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,
        /// Match against title, description, and ingredients
        #[arg(long, default_value = "")]
        search: String,
        /// Keep only one difficulty: easy, medium, or hard
        #[arg(long)]
        difficulty: Option<String>,
        /// Keep only recipes with a tag containing this text
        #[arg(long, default_value = "")]
        tag: String,
        /// none, title-asc, title-desc, diff-asc, diff-desc, updated-asc,
        /// updated-desc
        #[arg(long, default_value = "none")]
        sort: String,
    },
    /// Print one recipe in full
    Show { id: String },
    /// Create a recipe; list fields are comma-separated text
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "easy")]
        difficulty: String,
        #[arg(long, default_value = "")]
        ingredients: String,
        #[arg(long, default_value = "")]
        steps: String,
        #[arg(long, default_value = "")]
        tags: String,
    },
    /// Update fields of an existing recipe, keeping the rest
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        difficulty: Option<String>,
        #[arg(long)]
        ingredients: Option<String>,
        #[arg(long)]
        steps: Option<String>,
        #[arg(long)]
        tags: Option<String>,
    },
    /// Delete a recipe
    Delete { id: String },
    /// Move a recipe within a page and persist the new numbering
    Move {
        /// 1-based position on the page to move from
        from: usize,
        /// 1-based position on the page to move to
        to: usize,
        /// shift or swap
        #[arg(long, default_value = "shift")]
        policy: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,
    },
    /// Build a mailto link sharing the given recipes
    Share {
        /// Ids of recipes on the selected page
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,
    },
    /// Send a message to the contact inbox
    Contact {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = StoreConfig::from_env()?;
    tracing::debug!(backend = config.backend.as_str(), url = %config.api_url, "configured store");

    match cli.command {
        Commands::List {
            page,
            page_size,
            search,
            difficulty,
            tag,
            sort,
        } => list(&config, page, page_size, search, difficulty, tag, sort).await,
        Commands::Show { id } => show(&config, &id).await,
        Commands::Create {
            title,
            description,
            difficulty,
            ingredients,
            steps,
            tags,
        } => {
            create(
                &config,
                RecipeForm {
                    title,
                    description,
                    ingredients,
                    steps,
                    tags,
                    difficulty: parse_difficulty(&difficulty)?,
                },
            )
            .await
        }
        Commands::Edit {
            id,
            title,
            description,
            difficulty,
            ingredients,
            steps,
            tags,
        } => {
            edit(
                &config, &id, title, description, difficulty, ingredients, steps, tags,
            )
            .await
        }
        Commands::Delete { id } => delete(&config, &id).await,
        Commands::Move {
            from,
            to,
            policy,
            page,
            page_size,
        } => move_recipe(&config, from, to, &policy, page, page_size).await,
        Commands::Share {
            ids,
            page,
            page_size,
        } => share_recipes(&config, ids, page, page_size).await,
        Commands::Contact {
            subject,
            email,
            message,
        } => contact(&config, subject, email, message).await,
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn parse_difficulty(raw: &str) -> Result<Difficulty> {
    Difficulty::from_str(raw)
        .ok_or_else(|| anyhow!("unknown difficulty {raw:?} (expected easy, medium, or hard)"))
}

/// Build a view-model whose first load already targets the given page.
fn paged_view_model(config: &StoreConfig, page: u32, page_size: u32) -> Result<ListViewModel> {
    let store = config.build_store()?;
    let state = ViewState::default()
        .apply(Event::PageSizeChanged(page_size))
        .apply(Event::PageChanged(page));
    Ok(ListViewModel::with_state(store, state))
}

async fn list(
    config: &StoreConfig,
    page: u32,
    page_size: u32,
    search: String,
    difficulty: Option<String>,
    tag: String,
    sort: String,
) -> Result<()> {
    let mut vm = paged_view_model(config, page, page_size)?;
    vm.set_search(search);
    vm.set_tag_filter(tag);
    vm.set_sort(
        SortOption::from_str(&sort).ok_or_else(|| anyhow!("unknown sort option {sort:?}"))?,
    );
    match difficulty.as_deref() {
        None | Some("") => {}
        Some(raw) => vm.set_difficulty(Some(parse_difficulty(raw)?)),
    }

    vm.refresh().await?;
    print_page(&vm);
    Ok(())
}

async fn show(config: &StoreConfig, id: &str) -> Result<()> {
    let store = config.build_store()?;
    let recipe = store.get(id).await?;
    println!("Id: {}", recipe.id);
    println!("{}", share::summary(&recipe));
    Ok(())
}

async fn create(config: &StoreConfig, form: RecipeForm) -> Result<()> {
    let mut vm = ListViewModel::new(config.build_store()?);
    vm.edit_form(form);
    let created = vm.create().await?;
    println!("created {} at position {}", created.id, created.order);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn edit(
    config: &StoreConfig,
    id: &str,
    title: Option<String>,
    description: Option<String>,
    difficulty: Option<String>,
    ingredients: Option<String>,
    steps: Option<String>,
    tags: Option<String>,
) -> Result<()> {
    let store = config.build_store()?;
    let existing = store.get(id).await?;

    let mut form = RecipeForm::from_recipe(&existing);
    if let Some(title) = title {
        form.title = title;
    }
    if let Some(description) = description {
        form.description = description;
    }
    if let Some(raw) = difficulty {
        form.difficulty = parse_difficulty(&raw)?;
    }
    if let Some(ingredients) = ingredients {
        form.ingredients = ingredients;
    }
    if let Some(steps) = steps {
        form.steps = steps;
    }
    if let Some(tags) = tags {
        form.tags = tags;
    }

    let payload = form.to_update(&existing, Utc::now());
    let mut vm = ListViewModel::new(store);
    let updated = vm.update(id, payload).await?;
    println!("updated {}", updated.id);
    Ok(())
}

async fn delete(config: &StoreConfig, id: &str) -> Result<()> {
    let mut vm = ListViewModel::new(config.build_store()?);
    vm.delete(id).await?;
    println!("deleted {id}");
    Ok(())
}

async fn move_recipe(
    config: &StoreConfig,
    from: usize,
    to: usize,
    policy: &str,
    page: u32,
    page_size: u32,
) -> Result<()> {
    let policy = MovePolicy::from_str(policy)
        .ok_or_else(|| anyhow!("unknown move policy {policy:?} (expected shift or swap)"))?;
    let (from, to) = match (from.checked_sub(1), to.checked_sub(1)) {
        (Some(from), Some(to)) => (from, to),
        _ => bail!("positions are 1-based"),
    };

    let mut vm = paged_view_model(config, page, page_size)?;
    vm.refresh().await?;
    if from >= vm.state().recipes.len() || to >= vm.state().recipes.len() {
        bail!("position out of range for this page");
    }
    vm.move_recipe(from, to, policy).await?;
    print_page(&vm);
    Ok(())
}

async fn share_recipes(
    config: &StoreConfig,
    ids: Vec<String>,
    page: u32,
    page_size: u32,
) -> Result<()> {
    let mut vm = paged_view_model(config, page, page_size)?;
    vm.refresh().await?;
    for id in ids {
        vm.toggle_selected(id);
    }
    match vm.share_link() {
        Some(link) => {
            println!("{link}");
            Ok(())
        }
        None => bail!("none of the given ids are on page {page}"),
    }
}

async fn contact(
    config: &StoreConfig,
    subject: String,
    email: String,
    message: String,
) -> Result<()> {
    let client = ContactClient::new(config.contact_url.clone());
    let payload = ContactMessage {
        subject,
        email,
        message,
    };
    println!("{}", ContactStatus::Sending);
    let status = client.send(&payload).await;
    println!("{status}");
    Ok(())
}

fn print_page(vm: &ListViewModel) {
    let state = vm.state();
    let visible = vm.visible();
    if visible.is_empty() {
        println!("nothing to show on this page");
    }
    for recipe in &visible {
        print_row(recipe);
    }
    println!(
        "page {} of {} ({} recipes total)",
        state.pager.page,
        state.total_pages(),
        state.total
    );
}

fn print_row(recipe: &Recipe) {
    let tags = if recipe.tags.is_empty() {
        String::new()
    } else {
        format!("  [{}]", recipe.tags.join(", "))
    };
    println!(
        "{:>4}  {:<30} {:<7} {}{}",
        recipe.order,
        recipe.title,
        recipe.difficulty.as_str(),
        recipe.id,
        tags
    );
}

use std::io::Write;
use std::path::PathBuf;

use discharge_app::config::{AppConfig, ConfigStore};
use discharge_app::context::{self, AppContext};
use discharge_app::plans::{LoadState, RecoveryPlanManager};
use discharge_app::session::{self, Command as SessionCommand, ParseError, PlanRef};
use discharge_app::speech::ReadAloud;
use discharge_app::upload::{SelectedFile, SubmitError, SubmitFlow, UploadForm, MISSING_INPUT};
use discharge_client::credential::{Credential, CredentialFile};
use discharge_render::{calendar, render};
use eyre::{Result, WrapErr};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};

use crate::cli::{Args, Command, ConfigAction, SimplifyArgs};

const LOGIN_HINT: &str = "Not logged in. Run `discharge login --token <TOKEN>` first.";

pub async fn run(args: Args) -> Result<()> {
    let (store, credentials) = locations(args.config_dir.clone())?;

    let mut config = store.load()?;
    if let Some(url) = &args.api_url {
        config.api_base_url = url.clone();
    }
    if let Some(language) = &args.language {
        config.language_code = language.clone();
    }

    match args.command {
        Command::Login { token } => login(&credentials, token),
        Command::Logout => {
            credentials.clear()?;
            println!("Logged out.");
            Ok(())
        }
        Command::Config { action } => configure(&store, config, action),
        Command::Simplify(simplify_args) => {
            let ctx = build_context(&config, &credentials)?;
            simplify(&ctx, simplify_args).await
        }
        Command::Plans { interactive } => {
            let ctx = build_context(&config, &credentials)?;
            plans(&ctx, interactive).await
        }
    }
}

fn locations(config_dir: Option<PathBuf>) -> Result<(ConfigStore, CredentialFile)> {
    match config_dir {
        Some(dir) => Ok((
            ConfigStore::at(&dir),
            CredentialFile::at(dir.join("credential")),
        )),
        None => Ok((
            ConfigStore::default_location()?,
            CredentialFile::default_location()?,
        )),
    }
}

fn build_context(config: &AppConfig, credentials: &CredentialFile) -> Result<AppContext> {
    let env_token = std::env::var(context::TOKEN_ENV).ok();
    let credential = context::resolve_credential(env_token, credentials)?;
    AppContext::new(config, credential)
}

fn login(credentials: &CredentialFile, token: String) -> Result<()> {
    let credential = Credential::new(token).ok_or_else(|| eyre::eyre!("token must not be empty"))?;
    credentials.save(&credential)?;
    println!("Logged in. Token saved to {}", credentials.path().display());
    Ok(())
}

fn configure(store: &ConfigStore, mut config: AppConfig, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            println!("# {}", store.path().display());
            return Ok(());
        }
        ConfigAction::SetUrl { url } => config.api_base_url = url,
        ConfigAction::SetLanguage { code } => config.language_code = code,
        ConfigAction::SetPlayer { command } => {
            config.audio_player = Some(command).filter(|c| !c.trim().is_empty());
        }
    }
    store.save(&config)?;
    println!("Saved {}", store.path().display());
    Ok(())
}

async fn simplify(ctx: &AppContext, args: SimplifyArgs) -> Result<()> {
    let mut form = UploadForm::new();
    if let Some(path) = &args.file {
        let file = SelectedFile::read(path)
            .await
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        form.select_file(file);
    } else if let Some(text) = args.text {
        form.set_text(text);
    } else if args.stdin {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        form.set_text(text);
    }

    let mut flow = SubmitFlow::new();
    match flow
        .submit(&ctx.client, ctx.credential.as_ref(), &form)
        .await
    {
        Ok(()) => {}
        Err(SubmitError::MissingInput) => eyre::bail!(MISSING_INPUT),
        Err(SubmitError::LoginRequired) => eyre::bail!(LOGIN_HINT),
    }

    if let Some(message) = flow.error() {
        eyre::bail!(message.to_string());
    }
    let Some(result) = flow.result() else {
        eyre::bail!("no result was returned");
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print!("{}", render::render_result(result)?);
    }

    if let Some(dir) = &args.ics {
        match result.ics_content.as_deref().filter(|ics| !ics.trim().is_empty()) {
            Some(ics) => {
                let path = calendar::write_ics(dir, ics)?;
                eprintln!("Calendar saved to {}", path.display());
            }
            None => eprintln!("No follow-up appointments to add to a calendar."),
        }
    }

    if args.speak {
        let mut read_aloud = ReadAloud::new(ctx.audio_player.clone());
        read_aloud
            .speak(
                &ctx.client,
                ctx.credential.as_ref(),
                &result.simplified_summary,
                &ctx.language_code,
            )
            .await;
        if read_aloud.is_speaking() {
            tokio::select! {
                _ = read_aloud.wait() => {}
                _ = tokio::signal::ctrl_c() => read_aloud.stop().await,
            }
        }
    }

    Ok(())
}

async fn plans(ctx: &AppContext, interactive: bool) -> Result<()> {
    let mut manager = RecoveryPlanManager::new(ctx.credential.clone());
    manager.load(&ctx.client).await;
    check_loaded(&manager)?;
    show(&manager)?;

    if interactive {
        plan_session(ctx, &mut manager).await?;
    }
    Ok(())
}

fn check_loaded(manager: &RecoveryPlanManager) -> Result<()> {
    match manager.state() {
        LoadState::LoginRequired => eyre::bail!(LOGIN_HINT),
        LoadState::Failed(message) => eyre::bail!(message.clone()),
        _ => Ok(()),
    }
}

fn show(manager: &RecoveryPlanManager) -> Result<()> {
    print!("{}", render::render_plans(manager.store())?);
    Ok(())
}

async fn plan_session(ctx: &AppContext, manager: &mut RecoveryPlanManager) -> Result<()> {
    println!("\nType `help` for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("plans> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match session::parse(&line) {
            Ok(SessionCommand::Quit) => break,
            Ok(SessionCommand::Help) => println!("{}", session::HELP),
            Ok(SessionCommand::Show) => show(manager)?,
            Ok(SessionCommand::Reload) => {
                manager.load(&ctx.client).await;
                match check_loaded(manager) {
                    Ok(()) => show(manager)?,
                    Err(e) => println!("{e}"),
                }
            }
            Ok(SessionCommand::Select(target)) => {
                let id = match target {
                    PlanRef::Id(id) => Some(id),
                    PlanRef::Position(n) => manager.store().plans().nth(n).map(|p| p.id.clone()),
                };
                match id {
                    Some(id) if manager.select(&id) => show(manager)?,
                    _ => println!("No such plan."),
                }
            }
            Ok(SessionCommand::Toggle { day, task }) => match manager.toggle_selected(day, task) {
                None => println!("No plan selected."),
                Some(Ok(_)) => show(manager)?,
                Some(Err(e)) => println!("{e}"),
            },
            Err(ParseError::Empty) => {}
            Err(e) => println!("{e}"),
        }
    }
    Ok(())
}

//! Command Handlers
//!
//! Handler functions for CLI commands.

use quejas_client::{ClientConfig, Dashboard, FileTokenStore, TokenStore, UploadFile};
use quejas_core::{
    BranchFilters, CreateBranchDto, CreateInstructorDto, CreateManagerDto, EmailRequest,
    FormSubmission, InstructorFilters, ManagerFilters, UpdateBranchDto, UpdateManagerDto,
};
use tracing::debug;

use crate::commands::{
    auth::LoginArgs,
    branches::BranchCommands,
    complaints::{stats_filters, ComplaintCommands},
    config::ConfigCommands,
    email::EmailCommands,
    instructors::InstructorCommands,
    managers::ManagerCommands,
    ratings::RatingCommands,
    Cli, Commands, OutputFormat,
};
use crate::error::{CliError, CliResult};
use crate::output;

/// Effective client configuration: environment, then CLI overrides
pub fn load_config(cli: &Cli) -> ClientConfig {
    let config = ClientConfig::from_env();
    match &cli.api_url {
        Some(url) => config.with_api_url(url.clone()),
        None => config,
    }
}

/// Run the CLI with parsed arguments
pub async fn run(cli: Cli) -> CliResult<()> {
    let config = load_config(&cli);
    let format = cli.format;

    if let Commands::Config(cmd) = &cli.command {
        return handle_config(cmd, &config, format);
    }

    debug!(api_url = %config.api_url, "Connecting dashboard");
    let dashboard = Dashboard::from_config(config)?;

    match cli.command {
        Commands::Login(args) => handle_login(&dashboard, args, format).await,
        Commands::Logout => {
            dashboard.client.logout();
            output::print_success("Logged out");
            Ok(())
        }
        Commands::Complaints(cmd) => handle_complaints(&dashboard, cmd, format).await,
        Commands::Ratings(cmd) => handle_ratings(&dashboard, cmd, format).await,
        Commands::Branches(cmd) => handle_branches(&dashboard, cmd, format).await,
        Commands::Instructors(cmd) => handle_instructors(&dashboard, cmd, format).await,
        Commands::Managers(cmd) => handle_managers(&dashboard, cmd, format).await,
        Commands::Email(cmd) => handle_email(&dashboard, cmd, format).await,
        Commands::Upload { files } => handle_upload(&dashboard, files, format).await,
        Commands::Config(_) => Ok(()),
    }
}

/// Handle login
async fn handle_login(dashboard: &Dashboard, args: LoginArgs, format: OutputFormat) -> CliResult<()> {
    let user = dashboard.client.login(&args.email, &args.password).await?;
    match format {
        OutputFormat::Json => output::print_output(&user, format),
        _ => output::print_success(&format!("Logged in as {} ({})", user.name, user.role)),
    }
    Ok(())
}

/// Handle complaint commands
async fn handle_complaints(
    dashboard: &Dashboard,
    cmd: ComplaintCommands,
    format: OutputFormat,
) -> CliResult<()> {
    let store = &dashboard.complaints;

    if let Some(filters) = cmd.filters() {
        store.fetch(filters).await?;
        output::print_complaints(&store.items(), &store.pagination(), format);
        return Ok(());
    }

    match cmd {
        ComplaintCommands::Get { id } => {
            let complaint = store.get_by_id(&id).await?;
            output::print_complaint(&complaint, format);
        }
        ComplaintCommands::Stats { branch, from, to } => {
            let stats = store.stats(&stats_filters(branch, from, to)).await?;
            output::print_complaint_stats(&stats, format);
        }
        ComplaintCommands::Status { id, status, resolution } => {
            if status.is_terminal() && resolution.is_none() {
                output::print_warning("Closing a complaint without a resolution note");
            }
            match store.update_status(&id, status, resolution).await? {
                Some(complaint) => output::print_complaint(&complaint, format),
                None => output::print_success(&format!("Complaint {} is now {}", id, status)),
            }
        }
        ComplaintCommands::Delete { id } => {
            store.delete(&id).await?;
            output::print_success(&format!("Complaint {} deleted", id));
        }
        ComplaintCommands::List { .. } => {}
    }
    Ok(())
}

/// Handle rating commands
async fn handle_ratings(dashboard: &Dashboard, cmd: RatingCommands, format: OutputFormat) -> CliResult<()> {
    let store = &dashboard.ratings;

    match cmd {
        RatingCommands::List(args) => {
            store.fetch(args.to_filters()).await?;
            output::print_ratings(&store.items(), &store.pagination(), format);
        }
        RatingCommands::Get { id } => {
            let rating = store.get_by_id(&id).await?;
            output::print_output(&rating, format);
        }
        RatingCommands::Stats(args) => {
            let stats = store.stats(&args.to_filters()).await?;
            output::print_rating_stats(&stats, format);
        }
        RatingCommands::Analytics(args) => {
            let analytics = store.analytics(&args.to_filters()).await?;
            output::print_analytics(&analytics, format);
        }
        RatingCommands::Nps(args) => {
            store.fetch(args.to_filters()).await?;
            let pagination = store.pagination();
            if pagination.has_next() {
                output::print_warning(&format!(
                    "NPS covers page {} of {} only; raise --limit to include more ratings",
                    pagination.page, pagination.total_pages
                ));
            }
            output::print_nps(&store.nps_breakdown(), format);
        }
        RatingCommands::Delete { id } => {
            store.delete(&id).await?;
            output::print_success(&format!("Rating {} deleted", id));
        }
    }
    Ok(())
}

/// Handle branch commands
async fn handle_branches(dashboard: &Dashboard, cmd: BranchCommands, format: OutputFormat) -> CliResult<()> {
    let store = &dashboard.branches;

    match cmd {
        BranchCommands::List { page, active, search } => {
            let filters = BranchFilters {
                page: page.page,
                limit: page.limit,
                is_active: active,
                search,
            };
            store.fetch(filters).await?;
            output::print_branches(&store.items(), &store.pagination(), format);
        }
        BranchCommands::Get { id } => {
            let branch = store.get_by_id(&id).await?;
            output::print_output(&branch, format);
        }
        BranchCommands::Create { name, address } => {
            let dto = CreateBranchDto {
                name: name.clone(),
                address,
                is_active: None,
            };
            store.create(&dto).await?;
            output::print_success(&format!("Branch {} created", name));
        }
        BranchCommands::Update { id, name, address, active } => {
            if name.is_none() && address.is_none() && active.is_none() {
                return Err(CliError::invalid_arg("Nothing to update"));
            }
            let dto = UpdateBranchDto {
                name,
                address,
                is_active: active,
            };
            store.update(&id, &dto).await?;
            output::print_success(&format!("Branch {} updated", id));
        }
        BranchCommands::Delete { id } => {
            store.delete(&id).await?;
            output::print_success(&format!("Branch {} deleted", id));
        }
    }
    Ok(())
}

/// Handle instructor commands
async fn handle_instructors(
    dashboard: &Dashboard,
    cmd: InstructorCommands,
    format: OutputFormat,
) -> CliResult<()> {
    let store = &dashboard.instructors;

    match cmd {
        InstructorCommands::List { page, branch, discipline, search } => {
            let filters = InstructorFilters {
                page: page.page,
                limit: page.limit,
                branch_id: branch,
                discipline,
                is_active: None,
                search,
            };
            store.fetch(filters).await?;
            output::print_instructors(&store.items(), &store.pagination(), format);
        }
        InstructorCommands::Get { id } => {
            let instructor = store.get_by_id(&id).await?;
            output::print_output(&instructor, format);
        }
        InstructorCommands::Ratings { id, page } => {
            let ratings = store.ratings_for(&id, page.page, page.limit).await?;
            output::print_ratings(&ratings.ratings, &ratings.pagination, format);
        }
        InstructorCommands::Create { name, email, disciplines, branches } => {
            let dto = CreateInstructorDto {
                name: name.clone(),
                email,
                disciplines,
                branch_ids: branches,
            };
            store.create(&dto).await?;
            output::print_success(&format!("Instructor {} created", name));
        }
        InstructorCommands::Delete { id } => {
            store.delete(&id).await?;
            output::print_success(&format!("Instructor {} deleted", id));
        }
    }
    Ok(())
}

/// Handle back-office user commands
async fn handle_managers(dashboard: &Dashboard, cmd: ManagerCommands, format: OutputFormat) -> CliResult<()> {
    let store = &dashboard.managers;

    match cmd {
        ManagerCommands::List { page, branch, role } => {
            let filters = ManagerFilters {
                page: page.page,
                limit: page.limit,
                branch_id: branch,
                role,
            };
            store.fetch(filters).await?;
            output::print_managers(&store.items(), &store.pagination(), format);
        }
        ManagerCommands::Get { id } => {
            let manager = store.get_by_id(&id).await?;
            output::print_output(&manager, format);
        }
        ManagerCommands::Create { name, email, password, role, branch } => {
            let dto = CreateManagerDto {
                name,
                email: email.clone(),
                password,
                role,
                branch_id: branch,
            };
            store.create(&dto).await?;
            output::print_success(&format!("User {} registered", email));
        }
        ManagerCommands::Deactivate { id } => {
            let dto = UpdateManagerDto {
                is_active: Some(false),
                ..Default::default()
            };
            store.update(&id, &dto).await?;
            output::print_success(&format!("User {} deactivated", id));
        }
        ManagerCommands::Delete { id } => {
            store.delete(&id).await?;
            output::print_success(&format!("User {} deleted", id));
        }
    }
    Ok(())
}

/// Handle email commands
async fn handle_email(dashboard: &Dashboard, cmd: EmailCommands, format: OutputFormat) -> CliResult<()> {
    let response = match cmd {
        EmailCommands::Send { to, subject, text, html } => {
            if text.is_none() && html.is_none() {
                return Err(CliError::invalid_arg("Provide --text or --html"));
            }
            let request = EmailRequest {
                to,
                subject,
                html,
                text,
                ..Default::default()
            };
            dashboard.email.send(request).await?
        }
        EmailCommands::SubmitForm {
            full_name,
            email,
            branch,
            observation_type,
            detail,
            attachments,
        } => {
            let form = FormSubmission {
                full_name,
                email,
                branch_id: branch,
                observation_type,
                detail,
                attachments,
                from: None,
                from_name: None,
                dashboard_url: None,
            };
            dashboard.email.submit_form(form).await?
        }
    };

    match format {
        OutputFormat::Json => output::print_output(&response, format),
        _ => match &response.message_id {
            Some(id) => output::print_success(&format!("Email sent ({})", id)),
            None => output::print_success("Email sent"),
        },
    }
    Ok(())
}

/// Handle uploads, one file at a time
async fn handle_upload(
    dashboard: &Dashboard,
    paths: Vec<std::path::PathBuf>,
    format: OutputFormat,
) -> CliResult<()> {
    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        files.push(UploadFile::from_path(path).await?);
    }

    let names: Vec<String> = files.iter().map(|f| f.name.clone()).collect();
    let outcomes = dashboard
        .uploader
        .upload_many(&files, |index, progress| {
            if format != OutputFormat::Json {
                output::print_upload_progress(&names[index], progress);
            }
        })
        .await;

    output::print_upload_outcomes(&outcomes, format);

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    if failed > 0 {
        return Err(CliError::upload(format!("{} of {} files failed", failed, outcomes.len())));
    }
    Ok(())
}

/// Handle config commands
fn handle_config(cmd: &ConfigCommands, config: &ClientConfig, format: OutputFormat) -> CliResult<()> {
    match cmd {
        ConfigCommands::Show => {
            if format == OutputFormat::Json {
                output::print_output(
                    &serde_json::json!({
                        "apiUrl": config.api_url,
                        "httpTimeoutSecs": config.http_timeout_secs,
                        "stateDir": config.state_dir,
                        "imageDomain": config.image_domain,
                        "frontendUrl": config.frontend_url,
                        "storage": {
                            "endpoint": config.storage.endpoint,
                            "region": config.storage.region,
                            "bucket": config.storage.bucket,
                            "pathStyle": config.storage.path_style,
                            "credentials": config.storage.has_credentials(),
                        },
                        "upload": {
                            "maxFileSizeMb": config.upload.max_file_size_mb,
                            "allowedTypes": config.upload.allowed_types,
                        },
                    }),
                    format,
                );
                return Ok(());
            }
            output::print_info("Current Configuration:");
            output::print_row("API URL:", &config.api_url);
            output::print_row("Timeout:", &format!("{}s", config.http_timeout_secs));
            output::print_row("State dir:", &config.state_dir.display().to_string());
            output::print_row("Image domain:", &config.image_domain);
            output::print_row("Frontend URL:", &config.frontend_url);
            output::print_row("Email sender:", &format!("{} <{}>", config.email.from_name, config.email.from_address));
            output::print_row("Storage bucket:", &config.storage.bucket);
            output::print_row(
                "Presigning:",
                if config.storage.has_credentials() { "local (SigV4)" } else { "backend" },
            );
            output::print_row("Max upload:", &format!("{}MB", config.upload.max_file_size_mb));
            output::print_row("Allowed types:", &config.upload.allowed_types.join(", "));
        }
        ConfigCommands::Session => {
            let tokens = FileTokenStore::new(&config.state_dir);
            let state = if tokens.get().is_some() {
                "logged in"
            } else {
                "public access"
            };
            output::print_row("Token file:", &tokens.path().display().to_string());
            output::print_row("Session:", state);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_api_url_flag_overrides_environment() {
        let cli = Cli::try_parse_from(["quejas", "-a", "https://api.siclo.com/api", "logout"]).unwrap();
        let config = load_config(&cli);
        assert_eq!(config.api_url, "https://api.siclo.com/api");
    }
}

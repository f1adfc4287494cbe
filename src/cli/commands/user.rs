//! User management command handlers

use crate::config::Config;
use crate::domain::Role;
use crate::models::user::NewUser;
use crate::state::SharedState;

pub async fn cmd_user_add(
    config: Config,
    username: String,
    name: String,
    password: String,
    role: Role,
) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;

    let user = state
        .user_service
        .create_user(NewUser {
            name,
            username,
            password,
            role,
        })
        .await?;

    println!("✓ Created user '{}' ({})", user.username, user.role);
    Ok(())
}

pub async fn cmd_user_list(config: Config) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;
    let users = state.user_service.list_users().await?;

    if users.is_empty() {
        println!("No users.");
        println!();
        println!("Add one with: anime-api user add <username> --name <name> --password <pw>");
        return Ok(());
    }

    println!("Users ({} total)", users.len());
    println!("{:-<70}", "");

    for user in users {
        println!("{:<5} {:<20} {:<25} {}", user.id, user.username, user.name, user.role);
        println!("      created {}", user.created_at);
    }

    Ok(())
}

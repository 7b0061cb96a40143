//! Sign-in, registration and session commands.

use anyhow::Result;
use bugpilot::api::VerifyOtpRequest;
use bugpilot::ui::icons::{CHECK, USER};
use console::style;

use super::AppContext;
use super::super::RegisterCommands;

pub async fn cmd_login(ctx: &AppContext, email: &str, password: &str) -> Result<()> {
    let credentials = ctx.client.login(email, password).await?;
    println!(
        "{}Signed in as {}",
        CHECK,
        style(&credentials.user.name).bold()
    );
    Ok(())
}

pub async fn cmd_register(ctx: &AppContext, command: RegisterCommands) -> Result<()> {
    match command {
        RegisterCommands::SendOtp { email } => {
            ctx.client.send_otp(&email).await?;
            println!("{}Verification code sent to {}", CHECK, email);
            println!(
                "Finish with: bugpilot register verify --name <NAME> --email {} --otp <CODE>",
                email
            );
        }
        RegisterCommands::Verify {
            name,
            email,
            password,
            otp,
        } => {
            let credentials = ctx
                .client
                .verify_otp(&VerifyOtpRequest {
                    name: &name,
                    email: &email,
                    password: &password,
                    otp: &otp,
                })
                .await?;
            println!(
                "{}Account created. Signed in as {}",
                CHECK,
                style(&credentials.user.name).bold()
            );
        }
    }
    Ok(())
}

pub fn cmd_logout(ctx: &AppContext) -> Result<()> {
    if !ctx.client.session().is_active() {
        println!("Not signed in.");
        return Ok(());
    }
    ctx.client.logout();
    println!("{}Signed out", CHECK);
    Ok(())
}

pub fn cmd_whoami(ctx: &AppContext) -> Result<()> {
    match ctx.client.session().user() {
        Some(user) => {
            println!("{}{}", USER, style(&user.name).bold());
            if let Some(email) = &user.email {
                println!("  {}", email);
            }
            println!("  {}", style(format!("#{}", user.id)).dim());
        }
        None => println!("Not signed in. Run 'bugpilot login' first."),
    }
    Ok(())
}

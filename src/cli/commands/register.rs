//! Register member command handler

use std::io::{self, BufRead, Write};

use anyhow::bail;

use crate::config::Config;
use crate::domain::Member;
use crate::domain::validation::RegistrationForm;
use crate::services::MemberError;

/// Field values given on the command line. Anything missing is prompted for.
#[derive(Debug, Default)]
pub struct RegisterArgs {
    pub name: Option<String>,
    pub email: Option<String>,
    pub rank: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

fn prompt(input: &mut impl BufRead, label: &str) -> anyhow::Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn given_or_prompt(
    input: &mut impl BufRead,
    given: Option<String>,
    label: &str,
) -> anyhow::Result<String> {
    match given {
        Some(value) => Ok(value),
        None => prompt(input, label),
    }
}

/// Fills the form from flags, prompting on `input` for the rest. Passwords
/// are always prompted.
fn read_form(input: &mut impl BufRead, args: RegisterArgs) -> anyhow::Result<RegistrationForm> {
    let name = given_or_prompt(input, args.name, "Full name")?;
    let email = given_or_prompt(input, args.email, "Email")?;
    let rank = match args.rank {
        Some(rank) => rank,
        None => {
            println!("Ranks: see `muster ranks`");
            prompt(input, "Military rank")?
        }
    };
    let phone = given_or_prompt(input, args.phone, "Phone (optional)")?;
    let address = given_or_prompt(input, args.address, "Address (optional)")?;
    let password = prompt(input, "Password")?;
    let confirm_password = prompt(input, "Confirm password")?;

    Ok(RegistrationForm {
        name: Some(name),
        email: Some(email),
        password: Some(password),
        confirm_password: Some(confirm_password),
        phone: Some(phone),
        address: Some(address),
        military_rank: Some(rank),
    })
}

/// Prints the outcome. Rejected registrations are errors so the process exits
/// non-zero.
fn report(result: Result<Member, MemberError>) -> anyhow::Result<()> {
    match result {
        Ok(member) => {
            println!("✓ Member registered (ID: {})", member.id);
            super::print_member(&member);
            Ok(())
        }
        Err(MemberError::Validation(errors)) => {
            println!("Registration rejected:");
            for err in errors.iter() {
                println!("  {}: {}", err.field, err.message);
            }
            bail!("Registration rejected: {} invalid field(s)", errors.len())
        }
        Err(MemberError::DuplicateEmail(email)) => {
            bail!("This email address is already registered: {email}")
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn cmd_register(config: &Config, args: RegisterArgs) -> anyhow::Result<()> {
    let state = super::connect_state(config).await?;

    let form = read_form(&mut io::stdin().lock(), args)?;
    report(state.member_service.register(form).await)
}

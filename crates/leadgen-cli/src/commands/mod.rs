pub mod auth;
pub mod brands;
pub mod config;
pub mod dashboard;
pub mod qa;
pub mod sellers;

use dialoguer::Password;
use leadgen_core::records::{ListQuery, SellerUpdate};

use crate::{ListArgs, SellerChangeArgs};

impl From<ListArgs> for ListQuery {
    fn from(args: ListArgs) -> Self {
        ListQuery {
            page: args.page,
            limit: args.limit,
            status: args.status,
            search: args.search,
        }
    }
}

impl From<SellerChangeArgs> for SellerUpdate {
    fn from(args: SellerChangeArgs) -> Self {
        SellerUpdate {
            name: args.name,
            email: args.email,
            phone: args.phone,
            company_name: args.company,
            location: args.location,
            status: args.status,
            notes: args.notes,
        }
    }
}

/// Prompts for a password without echoing it, used when none was passed as
/// a flag.
fn read_password(confirm: bool) -> anyhow::Result<String> {
    let prompt = Password::new().with_prompt("Password");
    let prompt = if confirm {
        prompt.with_confirmation("Confirm password", "Passwords do not match")
    } else {
        prompt
    };
    Ok(prompt.interact()?)
}

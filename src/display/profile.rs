//! Profile and about-page formatting

use super::format::format_date;
use crate::models::Profile;

/// Format the profile page
pub fn format_profile(profile: &Profile) -> String {
    let mut output = String::new();

    output.push_str(&format!("Hello, {}!\n\n", profile.display_name()));
    output.push_str(&format!(
        "Full name:    {}\n",
        profile.full_name.as_deref().unwrap_or("(not set)")
    ));
    output.push_str(&format!("Email:        {}\n", profile.email));
    if let Some(created) = profile.created_at {
        output.push_str(&format!(
            "Member since: {}\n",
            format_date(created.date_naive())
        ));
    }

    output
}

/// Format the about page
pub fn format_about() -> String {
    format!(
        "Expense Tracker {}\n\n\
         Record what you spend, see this month's total at a glance and\n\
         search your history by name, amount or date.\n\n\
         Your data is stored in your own backend project; sign in with\n\
         'expenses auth login' to get started.\n",
        env!("CARGO_PKG_VERSION")
    )
}

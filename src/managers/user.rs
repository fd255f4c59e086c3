//! Interactive user flows.

use crate::core::console::Console;
use crate::core::error::AssetOsError;
use crate::core::output;
use crate::core::tui::ItemStatus;
use crate::managers::input::{ask, parse_edit, parse_email, parse_id};
use crate::managers::report;
use crate::services::user::{NewUser, UserService};
use std::io::{BufRead, Write};

pub struct UserManager<'a> {
    users: UserService<'a>,
}

impl<'a> UserManager<'a> {
    pub fn new(users: UserService<'a>) -> Self {
        Self { users }
    }

    pub fn list_users<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<(), AssetOsError> {
        console.section("All Users")?;
        let users = match self.users.list_all() {
            Ok(users) => users,
            Err(e) => {
                report(console, "listing users", &e)?;
                return Ok(());
            }
        };
        if users.is_empty() {
            console.line("No users found.")?;
            return Ok(());
        }
        for user in &users {
            for line in output::user_lines(user) {
                console.line(line)?;
            }
            console.line(output::RECORD_SEPARATOR)?;
        }
        Ok(())
    }

    pub fn add_new_user<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<(), AssetOsError> {
        console.section("Add New User")?;
        let name = console.prompt("User Name: ")?;
        let Some(email) = ask(console, "Email: ", parse_email)? else {
            return Ok(());
        };
        let department = console.prompt("Department: ")?;

        let new = NewUser {
            name,
            email,
            department,
        };
        match self.users.create(&new) {
            Ok(user) => console.status(
                &format!("User created successfully! ID: {}", user.id),
                ItemStatus::Created,
            )?,
            Err(e) => report(console, "creating user", &e)?,
        }
        Ok(())
    }

    pub fn update_user<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<(), AssetOsError> {
        console.section("Update User")?;
        let Some(id) = ask(console, "Enter User ID to update: ", parse_id)? else {
            return Ok(());
        };
        let mut user = match self.users.get_by_id(id) {
            Ok(Some(user)) => user,
            Ok(None) => {
                console.status("User not found.", ItemStatus::Failed)?;
                return Ok(());
            }
            Err(e) => {
                report(console, "loading user", &e)?;
                return Ok(());
            }
        };

        console.line(format!("Current Name: {}", user.name))?;
        let name = console.prompt("New Name (leave blank to keep current): ")?;
        if !name.is_empty() {
            user.name = name;
        }

        console.line(format!("Current Email: {}", user.email))?;
        let Some(email) = ask(
            console,
            "New Email (leave blank to keep current): ",
            |s| parse_edit(s, parse_email),
        )?
        else {
            return Ok(());
        };
        email.apply(&mut user.email);

        console.line(format!("Current Department: {}", user.department))?;
        let department = console.prompt("New Department (leave blank to keep current): ")?;
        if !department.is_empty() {
            user.department = department;
        }

        match self.users.update(&user) {
            Ok(true) => console.status(
                &format!("User updated successfully! ID: {}", user.id),
                ItemStatus::Updated,
            )?,
            Ok(false) => console.status("Failed to update user.", ItemStatus::Failed)?,
            Err(e) => report(console, "updating user", &e)?,
        }
        Ok(())
    }

    pub fn delete_user<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<(), AssetOsError> {
        console.section("Delete User")?;
        let Some(id) = ask(console, "Enter User ID to delete: ", parse_id)? else {
            return Ok(());
        };
        match self.users.delete(id) {
            Ok(true) => console.status("User deleted successfully!", ItemStatus::Deleted)?,
            Ok(false) => console.status("User not found.", ItemStatus::Failed)?,
            Err(e) => report(console, "deleting user", &e)?,
        }
        Ok(())
    }

    pub fn view_user<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<(), AssetOsError> {
        console.section("User Details")?;
        let Some(id) = ask(console, "Enter User ID: ", parse_id)? else {
            return Ok(());
        };
        let user = match self.users.get_by_id(id) {
            Ok(Some(user)) => user,
            Ok(None) => {
                console.status("User not found.", ItemStatus::Failed)?;
                return Ok(());
            }
            Err(e) => {
                report(console, "loading user", &e)?;
                return Ok(());
            }
        };
        for line in output::user_lines(&user) {
            console.line(line)?;
        }
        match self.users.assets_for_user(id) {
            Ok(assets) => {
                for line in output::user_asset_lines(&assets) {
                    console.line(line)?;
                }
            }
            Err(e) => report(console, "loading user assets", &e)?,
        }
        Ok(())
    }
}

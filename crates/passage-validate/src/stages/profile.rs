//! Profile stage.
//!
//! A missing or thin profile is a soft finding, but a populated field
//! that is malformed (website, gender, birthdate, timezone) blocks
//! import: the remote service would reject the whole payload over it.

use crate::context::ValidationContext;
use crate::issue::ErrorKind;
use crate::validator::Validator;
use async_trait::async_trait;
use passage_domain::{AddressOptions, CandidateRecord, ProfileFragment};

pub struct ProfileValidator;

impl ProfileValidator {
    fn check_website(fragment: &ProfileFragment, ctx: &mut ValidationContext) {
        if fragment.website.is_empty() {
            return;
        }
        if fragment.is_valid_website() {
            ctx.log("valid website");
        } else {
            ctx.error(
                ErrorKind::Website,
                format!("invalid website: \"{}\"", fragment.website),
            );
        }
    }

    fn check_gender(fragment: &ProfileFragment, ctx: &mut ValidationContext) {
        if fragment.gender.is_empty() {
            return;
        }
        if fragment.is_valid_gender() {
            ctx.log("valid gender");
        } else {
            ctx.error(
                ErrorKind::Gender,
                format!(
                    "invalid gender: \"{}\" - must be male, female or other",
                    fragment.gender
                ),
            );
        }
    }

    fn check_birthdate(fragment: &ProfileFragment, ctx: &mut ValidationContext) {
        if fragment.birthdate.is_empty() {
            return;
        }
        if fragment.is_valid_birthdate() {
            ctx.log("valid birthdate");
        } else {
            ctx.error(
                ErrorKind::Birthdate,
                format!(
                    "invalid or future birthdate: \"{}\"",
                    fragment.birthdate
                ),
            );
        }
    }

    fn check_zoneinfo(fragment: &ProfileFragment, ctx: &mut ValidationContext) {
        if fragment.zoneinfo.is_empty() {
            return;
        }
        if fragment.is_valid_zoneinfo() {
            ctx.log("valid zoneinfo");
        } else {
            ctx.error(
                ErrorKind::Timezone,
                format!("invalid zoneinfo: \"{}\"", fragment.zoneinfo),
            );
        }
    }

    fn check_locale(fragment: &ProfileFragment, ctx: &mut ValidationContext) {
        if fragment.locale.is_empty() {
            return;
        }
        if fragment.is_valid_locale() {
            ctx.log("valid locale");
        } else {
            ctx.log(format!("non-standard locale: \"{}\"", fragment.locale));
        }
    }

    fn check_address(fragment: &ProfileFragment, ctx: &mut ValidationContext) {
        match fragment.primary_address() {
            None => ctx.log("address missing"),
            Some(address) => {
                if address.is_valid(&AddressOptions::lenient()) {
                    ctx.log("valid address");
                } else {
                    ctx.log("address has invalid fields");
                }
            }
        }
    }
}

#[async_trait]
impl Validator for ProfileValidator {
    fn name(&self) -> &'static str {
        "profile"
    }

    async fn apply(&self, record: &CandidateRecord, ctx: &mut ValidationContext) {
        let Some(fragment) = record.profile() else {
            ctx.log("profile missing");
            return;
        };

        if fragment.given_name.is_empty() && fragment.family_name.is_empty() {
            ctx.log("profile name missing");
        } else {
            ctx.log("profile name present");
        }
        if !fragment.nickname.is_empty() {
            ctx.log("nickname present");
        }

        Self::check_website(fragment, ctx);
        Self::check_gender(fragment, ctx);
        Self::check_birthdate(fragment, ctx);
        Self::check_zoneinfo(fragment, ctx);
        Self::check_locale(fragment, ctx);
        Self::check_address(fragment, ctx);

        if fragment.has_minimum() {
            ctx.flags.profile = true;
            ctx.log("profile accepted");
        } else {
            ctx.log("minimum profile not met");
        }
    }
}

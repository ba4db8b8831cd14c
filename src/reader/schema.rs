use std::collections::BTreeSet;

use crate::store::{GroupListing, GroupPath};

use super::fields::Fields;

/// Whether a group's array names satisfy a schema
///
/// Lenient matching accepts groups holding extra arrays; strict matching requires
/// the group to hold exactly the schema's arrays.
pub(crate) fn satisfies(fields: &BTreeSet<String>, schema: &Fields<String>, strict: bool) -> bool {
    let has_all = schema.iter().all(|name| fields.contains(name));
    if strict {
        has_all && fields.len() == schema.len()
    } else {
        has_all
    }
}

/// Groups that satisfy a schema, in listing order
pub(crate) fn matching_groups(
    listings: &[GroupListing],
    schema: &Fields<String>,
    strict: bool,
) -> Vec<GroupPath> {
    listings
        .iter()
        .filter(|listing| satisfies(&listing.fields, schema, strict))
        .map(|listing| listing.path.clone())
        .collect()
}

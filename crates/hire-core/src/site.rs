//! Grouping of items by site for display.

use std::collections::BTreeMap;

use crate::equipment::Equipment;

/// Label used for items whose site is blank.
pub const UNKNOWN_SITE: &str = "Unknown site";

/// The grouping label for a stored site value. The stored value itself is
/// never rewritten.
pub fn site_label(site: &str) -> &str {
  match site.trim() {
    "" => UNKNOWN_SITE,
    trimmed => trimmed,
  }
}

/// Partition `items` by site label. Keys iterate in lexicographic order and
/// each group keeps the relative order of its items in the input.
pub fn group_by_site<'a, I>(items: I) -> BTreeMap<String, Vec<&'a Equipment>>
where
  I: IntoIterator<Item = &'a Equipment>,
{
  let mut groups: BTreeMap<String, Vec<&'a Equipment>> = BTreeMap::new();
  for item in items {
    groups
      .entry(site_label(&item.site).to_owned())
      .or_default()
      .push(item);
  }
  groups
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::equipment::NewEquipment;

  fn item(name: &str, site: &str) -> Equipment {
    let start = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
    Equipment::create(NewEquipment::new(name, site, 10.0, start))
  }

  #[test]
  fn blank_sites_fall_back_to_unknown() {
    assert_eq!(site_label(""), UNKNOWN_SITE);
    assert_eq!(site_label("   "), UNKNOWN_SITE);
    assert_eq!(site_label("  Depot "), "Depot");
  }

  #[test]
  fn groups_sorted_and_order_preserved() {
    let items = [
      item("Lift", "Site B"),
      item("Plate", "Site A"),
      item("Mixer", " Site B "),
      item("Pump", ""),
    ];

    let groups = group_by_site(&items);
    let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
    assert_eq!(keys, ["Site A", "Site B", UNKNOWN_SITE]);

    let b: Vec<&str> = groups["Site B"].iter().map(|i| i.name.as_str()).collect();
    assert_eq!(b, ["Lift", "Mixer"]);

    // Stored site stays untouched.
    assert_eq!(groups["Site B"][1].site, " Site B ");
    assert_eq!(groups[UNKNOWN_SITE][0].site, "");
  }

  #[test]
  fn empty_input_gives_no_groups() {
    let empty: Vec<Equipment> = Vec::new();
    assert!(group_by_site(&empty).is_empty());
  }
}

use crate::config::CategoryCaps;
use crate::model::{Category, Dataset};
use crate::nav::Route;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Anything that can answer a palette query
pub trait Search {
    fn search(&self, query: &str) -> Vec<SearchResult>;
}

/// What to draw in front of a result row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Badge {
    /// Record has a picture; terminals show the initials instead
    Avatar { url: String, initials: String },
    Icon { category: Category },
}

/// One palette row. Built per query, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// `user-1`, `device-3`, `group-2`, `template-5`
    pub id: String,
    pub category: Category,
    pub title: String,
    pub subtitle: String,
    pub route: Route,
    pub badge: Badge,
}

impl SearchResult {
    fn new(category: Category, id: &str, title: &str, subtitle: String) -> Self {
        Self {
            id: format!("{}-{}", category.id_prefix(), id),
            category,
            title: title.to_string(),
            subtitle,
            route: category.route(),
            badge: Badge::Icon { category },
        }
    }

    fn with_avatar(mut self, avatar: Option<&str>) -> Self {
        if let Some(url) = avatar.filter(|u| !u.is_empty()) {
            self.badge = Badge::Avatar {
                url: url.to_string(),
                initials: initials(&self.title),
            };
        }
        self
    }
}

/// Palette results of one category, with their positions in the flat list
#[derive(Debug)]
pub struct ResultGroup<'a> {
    pub category: Category,
    pub items: Vec<(usize, &'a SearchResult)>,
}

/// Stable group-by on category: groups appear in first-seen order and keep
/// the relative order of their members.
pub fn group_by_category(results: &[SearchResult]) -> Vec<ResultGroup<'_>> {
    let mut groups: Vec<ResultGroup<'_>> = Vec::new();
    for (index, result) in results.iter().enumerate() {
        match groups.iter_mut().find(|g| g.category == result.category) {
            Some(group) => group.items.push((index, result)),
            None => groups.push(ResultGroup {
                category: result.category,
                items: vec![(index, result)],
            }),
        }
    }
    groups
}

/// First letter of every word, as avatar fallbacks do
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}

/// Case-insensitive substring matcher over the four collections.
///
/// The collections are handed in, so a different backend only has to build a
/// `Dataset`.
#[derive(Debug, Clone)]
pub struct Matcher {
    data: Arc<Dataset>,
    caps: CategoryCaps,
}

/// `needle` must already be lower-cased
#[inline]
fn contains_ci(field: &str, needle: &str) -> bool {
    !field.is_empty() && field.to_lowercase().contains(needle)
}

#[inline]
fn opt_contains_ci(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|f| contains_ci(f, needle))
}

impl Matcher {
    pub fn new(data: Arc<Dataset>, caps: CategoryCaps) -> Self {
        Self { data, caps }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.data
    }

    pub fn caps(&self) -> CategoryCaps {
        self.caps
    }

    /// Run a query. Blank queries produce nothing.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        let raw = query.trim();
        if raw.is_empty() {
            return Vec::new();
        }
        let needle = raw.to_lowercase();
        let mut results = Vec::with_capacity(self.caps.total());

        results.extend(
            self.data
                .users
                .iter()
                .filter(|u| contains_ci(&u.name, &needle) || contains_ci(&u.visible_id, &needle))
                .take(self.caps.users)
                .map(|u| {
                    SearchResult::new(
                        Category::User,
                        &u.id,
                        &u.name,
                        format!("{} • {}", u.user_type, u.user_group),
                    )
                    .with_avatar(u.avatar.as_deref())
                }),
        );

        // IP addresses are compared verbatim against the trimmed query.
        results.extend(
            self.data
                .devices
                .iter()
                .filter(|d| {
                    contains_ci(&d.name, &needle)
                        || contains_ci(&d.model, &needle)
                        || contains_ci(&d.location, &needle)
                        || d.ip_address.as_deref().is_some_and(|ip| ip.contains(raw))
                })
                .take(self.caps.devices)
                .map(|d| {
                    SearchResult::new(
                        Category::Device,
                        &d.id,
                        &d.name,
                        format!("{} • {}", d.device_type, d.location),
                    )
                }),
        );

        results.extend(
            self.data
                .user_groups
                .iter()
                .filter(|g| {
                    contains_ci(&g.name, &needle)
                        || opt_contains_ci(g.description.as_deref(), &needle)
                })
                .take(self.caps.user_groups)
                .map(|g| {
                    SearchResult::new(
                        Category::UserGroup,
                        &g.id,
                        &g.name,
                        format!("{} members • {}", g.member_count, g.access_level),
                    )
                }),
        );

        results.extend(
            self.data
                .card_templates
                .iter()
                .filter(|t| contains_ci(&t.name, &needle) || contains_ci(&t.card_type, &needle))
                .take(self.caps.card_templates)
                .map(|t| {
                    SearchResult::new(
                        Category::CardTemplate,
                        &t.id,
                        &t.name,
                        format!("{} • {}", t.card_type, t.validity_period),
                    )
                }),
        );

        tracing::trace!(target: "search", query = raw, hits = results.len(), "matcher ran");
        results
    }
}

impl Search for Matcher {
    fn search(&self, query: &str) -> Vec<SearchResult> {
        Matcher::search(self, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CardTemplate, Device, User, UserGroup};

    fn sample() -> Matcher {
        Matcher::new(Arc::new(Dataset::sample()), CategoryCaps::default())
    }

    fn titles(results: &[SearchResult], category: Category) -> Vec<&str> {
        results
            .iter()
            .filter(|r| r.category == category)
            .map(|r| r.title.as_str())
            .collect()
    }

    #[test]
    fn blank_queries_return_nothing() {
        let m = sample();
        for q in ["", " ", "\t\n", "    "] {
            assert!(m.search(q).is_empty(), "query {:?}", q);
        }
    }

    #[test]
    fn matches_user_by_name_and_visible_id() {
        let m = sample();
        let by_name = m.search("JAMES");
        assert_eq!(titles(&by_name, Category::User), vec!["James Wilson"]);

        let by_id = m.search("g-0000");
        assert_eq!(titles(&by_id, Category::User), vec!["Thomas Anderson"]);
        assert_eq!(by_id[0].id, "user-12");
        assert_eq!(by_id[0].subtitle, "Guest • Guests");
        assert_eq!(by_id[0].route, Route::Users);
    }

    #[test]
    fn room_matches_server_room_device_but_not_template_zones() {
        let m = sample();
        let results = m.search("room");
        let devices = titles(&results, Category::Device);
        assert_eq!(devices, vec!["Server Room Access"]);
        assert_eq!(results.iter().find(|r| r.category == Category::Device).unwrap().subtitle, "Fingerprint • Server Room");
        // "IT Admin Card" lists the Server Room zone, but zones are not searched.
        assert!(titles(&results, Category::CardTemplate).is_empty());
    }

    #[test]
    fn no_matches_anywhere() {
        assert!(sample().search("112233").is_empty());
    }

    #[test]
    fn ip_address_matches_raw_substring() {
        let m = sample();
        let results = m.search("168.1.110");
        assert_eq!(titles(&results, Category::Device), vec!["Data Center Biometric"]);
    }

    #[test]
    fn caps_are_applied_in_source_order() {
        let m = sample();
        // Every device has "192.168.1." in its address.
        let results = m.search("192.168.1.");
        assert_eq!(
            titles(&results, Category::Device),
            vec!["Main Entrance Reader", "Face Recognition Terminal A", "Server Room Access"]
        );

        // "e" is everywhere.
        let results = m.search("e");
        assert_eq!(titles(&results, Category::User).len(), 3);
        assert_eq!(titles(&results, Category::Device).len(), 3);
        assert_eq!(titles(&results, Category::UserGroup).len(), 2);
        assert_eq!(titles(&results, Category::CardTemplate).len(), 2);
        assert_eq!(results.len(), 10);
    }

    #[test]
    fn output_is_grouped_in_fixed_category_order() {
        let results = sample().search("a");
        let order: Vec<Category> = results.iter().map(|r| r.category).collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
    }

    #[test]
    fn every_result_contains_the_query() {
        let m = sample();
        let data = m.dataset();
        for q in ["an", "lobby", "BIO", "card", "team", "1100", "vip", "1.10"] {
            let needle = q.to_lowercase();
            for r in m.search(q) {
                let raw_id = r.id.split_once('-').map(|(_, id)| id).unwrap();
                let hit = match r.category {
                    Category::User => {
                        let u = data.users.iter().find(|u| u.id == raw_id).unwrap();
                        u.name.to_lowercase().contains(&needle)
                            || u.visible_id.to_lowercase().contains(&needle)
                    }
                    Category::Device => {
                        let d = data.devices.iter().find(|d| d.id == raw_id).unwrap();
                        d.name.to_lowercase().contains(&needle)
                            || d.model.to_lowercase().contains(&needle)
                            || d.location.to_lowercase().contains(&needle)
                            || d.ip_address.as_deref().unwrap_or("").contains(q)
                    }
                    Category::UserGroup => {
                        let g = data.user_groups.iter().find(|g| g.id == raw_id).unwrap();
                        g.name.to_lowercase().contains(&needle)
                            || g.description.as_deref().unwrap_or("").to_lowercase().contains(&needle)
                    }
                    Category::CardTemplate => {
                        let t = data.card_templates.iter().find(|t| t.id == raw_id).unwrap();
                        t.name.to_lowercase().contains(&needle)
                            || t.card_type.to_lowercase().contains(&needle)
                    }
                };
                assert!(hit, "{} does not contain {:?}", r.id, q);
            }
        }
    }

    #[test]
    fn missing_optional_fields_never_match() {
        let data = Dataset {
            users: vec![User {
                id: "1".into(),
                user_type: String::new(),
                name: "Zed".into(),
                visible_id: String::new(),
                credential_type: String::new(),
                valid_period_start: String::new(),
                valid_period_end: String::new(),
                status: String::new(),
                user_group: String::new(),
                access_level: String::new(),
                floor_level: String::new(),
                avatar: None,
            }],
            devices: vec![serde_json::from_str::<Device>(r#"{"id":"1","name":"Gate"}"#).unwrap()],
            user_groups: vec![UserGroup {
                id: "1".into(),
                name: "Night".into(),
                description: None,
                member_count: 0,
                access_level: String::new(),
                created_at: String::new(),
                status: String::new(),
            }],
            card_templates: vec![serde_json::from_str::<CardTemplate>(r#"{"id":"1","name":"Pass"}"#).unwrap()],
            ..Default::default()
        };
        let m = Matcher::new(Arc::new(data), CategoryCaps::default());
        assert!(m.search("guards").is_empty());
        assert!(m.search("192").is_empty());
        assert_eq!(m.search("night").len(), 1);
    }

    #[test]
    fn avatar_badge_uses_initials() {
        let results = sample().search("kenji");
        assert_eq!(
            results[0].badge,
            Badge::Avatar { url: "/avatars/kenji.jpg".into(), initials: "KS".into() }
        );
        let results = sample().search("sarah");
        assert_eq!(results[0].badge, Badge::Icon { category: Category::User });
    }

    #[test]
    fn group_by_is_stable_and_indexed() {
        let results = sample().search("e");
        let groups = group_by_category(&results);
        let cats: Vec<Category> = groups.iter().map(|g| g.category).collect();
        assert_eq!(cats, Category::ALL.to_vec());

        let flat: Vec<usize> = groups.iter().flat_map(|g| g.items.iter().map(|(i, _)| *i)).collect();
        assert_eq!(flat, (0..results.len()).collect::<Vec<_>>());
    }

    #[test]
    fn group_by_merges_interleaved_categories() {
        let mut results = sample().search("e");
        results.swap(0, 3); // a device now comes first
        let groups = group_by_category(&results);
        assert_eq!(groups[0].category, Category::Device);
        assert_eq!(groups[1].category, Category::User);
        assert_eq!(groups[0].items.len(), 3);
        assert_eq!(groups[0].items[0].0, 0);
    }

    #[test]
    fn result_ids_are_unique() {
        let results = sample().search("e");
        let mut ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), results.len());
    }
}

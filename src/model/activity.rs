use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A published or draft "kegiatan" record from the hosted store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Activity {
    /// Returns the editable part of this record.
    pub fn to_draft(&self) -> ActivityDraft {
        ActivityDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.date,
            image_url: self.image_url.clone(),
            published: self.published,
        }
    }
}

/// Fields sent when creating or updating an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDraft {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub image_url: Option<String>,
    pub published: bool,
}

/// Returns the activities visible to the public, newest first.
pub fn public_activities(activities: &[Activity]) -> Vec<&Activity> {
    let mut visible: Vec<&Activity> = activities.iter().filter(|a| a.published).collect();
    visible.sort_by(|a, b| b.date.cmp(&a.date));
    visible
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_activity(id: &str, day: u32, published: bool) -> Activity {
        Activity {
            id: id.to_string(),
            title: format!("Kegiatan {id}"),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
            image_url: None,
            published,
            created_at: None,
        }
    }

    #[test]
    fn public_hides_unpublished() {
        let all = vec![
            make_activity("a", 1, true),
            make_activity("b", 2, false),
            make_activity("c", 3, true),
        ];
        let ids: Vec<&str> = public_activities(&all).iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn public_of_empty_is_empty() {
        assert!(public_activities(&[]).is_empty());
    }

    #[test]
    fn to_draft_copies_editable_fields() {
        let mut activity = make_activity("x", 9, true);
        activity.image_url = Some("https://example.org/a.jpg".into());
        let draft = activity.to_draft();
        assert_eq!(draft.title, "Kegiatan x");
        assert_eq!(draft.date, activity.date);
        assert_eq!(draft.image_url, activity.image_url);
        assert!(draft.published);
    }

    #[test]
    fn deserializes_store_row_with_missing_optionals() {
        let json = r#"{"id":"7f1c","title":"Wisuda","date":"2026-06-01"}"#;
        let activity: Activity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.id, "7f1c");
        assert_eq!(activity.description, "");
        assert!(!activity.published);
        assert_eq!(activity.image_url, None);
        assert_eq!(activity.created_at, None);
    }
}

//! Knowledge base page and modal fragments.

use std::collections::HashMap;

use sapdocs_client::models::{KbEntry, ServiceInfo};
use sapdocs_client::ApiError;
use sapdocs_config::catalog;

use crate::kb::forms::{CreateEntryForm, EditEntryForm};
use crate::pages::{banner, escape_html, layout};
use crate::state::{service_name, service_name_map};

pub fn page(
    services: &Result<Vec<ServiceInfo>, ApiError>,
    entries: &Result<Vec<KbEntry>, ApiError>,
    filter: Option<&str>,
) -> String {
    let names = match services {
        Ok(services) => service_name_map(services),
        Err(_) => service_name_map(&[]),
    };

    let mut main = String::from("<h1>Knowledge Base</h1>");
    main.push_str("<p class=\"muted\">Browse and manage SAP AI documentation entries</p>");

    main.push_str(
        "<p><button hx-get=\"/kb/entries/new\" hx-target=\"#modal\">Add Entry</button></p>",
    );

    if let Err(err) = services {
        main.push_str(&banner("error", &format!("Failed to load services: {err}")));
    }

    match entries {
        Ok(entries) if entries.is_empty() => {
            let hint = if filter.is_some() {
                " Try selecting a different service."
            } else {
                ""
            };
            main.push_str(&format!("<p class=\"muted\">No entries found.{hint}</p>"));
        }
        Ok(entries) => {
            for (group_name, group) in grouped(entries, &names) {
                main.push_str(&format!("<h3>{}</h3>", escape_html(&group_name)));
                for entry in group {
                    main.push_str(&entry_card(entry));
                }
            }
        }
        Err(err) => {
            main.push_str(&banner("error", &format!("Failed to load entries: {err}")));
        }
    }

    layout("Knowledge Base", &sidebar(services, entries, filter, &names), &main)
}

/// Group entries by service, groups ordered by display name, entries
/// keeping their backend order within each group.
fn grouped<'a>(
    entries: &'a [KbEntry],
    names: &HashMap<String, String>,
) -> Vec<(String, Vec<&'a KbEntry>)> {
    let mut groups: Vec<(String, Vec<&KbEntry>)> = Vec::new();
    for entry in entries {
        let display = service_name(&entry.service_key, names).to_string();
        match groups.iter_mut().find(|(name, _)| *name == display) {
            Some((_, group)) => group.push(entry),
            None => groups.push((display, vec![entry])),
        }
    }
    groups.sort_by(|(a, _), (b, _)| a.cmp(b));
    groups
}

fn entry_card(entry: &KbEntry) -> String {
    let mut card = String::from("<div class=\"card\">");
    card.push_str(&format!(
        "<p><strong>{}</strong> <span class=\"service-badge\" style=\"background:{}\">{}</span></p>",
        escape_html(&entry.title),
        catalog::service_color(&entry.service_key),
        escape_html(&entry.service_key)
    ));
    if !entry.url.is_empty() {
        card.push_str(&format!(
            "<p><a href=\"{url}\">{url}</a></p>",
            url = escape_html(&entry.url)
        ));
    }
    if !entry.description.is_empty() {
        card.push_str(&format!("<p>{}</p>", escape_html(&entry.description)));
    }
    if !entry.tags.is_empty() {
        card.push_str("<p>");
        for tag in &entry.tags {
            card.push_str(&format!(
                "<span class=\"tag-pill\">{}</span>",
                escape_html(tag)
            ));
        }
        card.push_str("</p>");
    }
    card.push_str(&format!(
        "<p><button class=\"secondary\" hx-get=\"/kb/entries/{id}/edit\" hx-target=\"#modal\">Edit</button> \
         <button class=\"secondary\" hx-get=\"/kb/entries/{id}/delete\" hx-target=\"#modal\">Delete</button></p>",
        id = escape_html(&entry.id)
    ));
    card.push_str("</div>");
    card
}

fn sidebar(
    services: &Result<Vec<ServiceInfo>, ApiError>,
    entries: &Result<Vec<KbEntry>, ApiError>,
    filter: Option<&str>,
    names: &HashMap<String, String>,
) -> String {
    let mut side = String::from("<h2>Filter</h2>");

    side.push_str("<form method=\"get\" action=\"/kb\"><select name=\"service\" onchange=\"this.form.submit()\">");
    side.push_str(&format!(
        "<option value=\"\"{}>All services</option>",
        if filter.is_none() { " selected" } else { "" }
    ));
    for (key, display) in service_options(services) {
        let selected = if filter == Some(key.as_str()) {
            " selected"
        } else {
            ""
        };
        side.push_str(&format!(
            "<option value=\"{}\"{selected}>{}</option>",
            escape_html(&key),
            escape_html(&display)
        ));
    }
    side.push_str("</select></form>");

    side.push_str("<hr /><h2>Stats</h2>");
    if let Ok(entries) = entries {
        let mut keys: Vec<&str> = entries.iter().map(|e| e.service_key.as_str()).collect();
        keys.sort_unstable();
        keys.dedup();
        let marker = if filter.is_some() { " (filtered)" } else { "" };
        side.push_str(&format!(
            "<p>{} entries across {} services{marker}</p>",
            entries.len(),
            keys.len()
        ));
    }
    if let Ok(services) = services {
        for service in services {
            side.push_str(&format!(
                "<p class=\"muted\">{}: {} docs</p>",
                escape_html(service_name(&service.key, names)),
                service.doc_count
            ));
        }
    }
    side
}

/// Options for the filter and create selects: the live service list when
/// available, the static catalog otherwise.
pub fn service_options(
    services: &Result<Vec<ServiceInfo>, ApiError>,
) -> Vec<(String, String)> {
    match services {
        Ok(services) if !services.is_empty() => services
            .iter()
            .map(|s| (s.key.clone(), s.display_name.clone()))
            .collect(),
        _ => catalog::SERVICE_DISPLAY
            .iter()
            .map(|(key, display)| (key.to_string(), display.to_string()))
            .collect(),
    }
}

fn modal(title: &str, body: &str) -> String {
    format!(
        "<div class=\"modal-backdrop\" hx-on:click=\"if (event.target === this) this.remove()\">\
         <div class=\"modal\"><h3>{}</h3>{body}</div></div>",
        escape_html(title)
    )
}

pub fn create_modal(
    options: &[(String, String)],
    form: Option<&CreateEntryForm>,
    error: Option<&str>,
) -> String {
    let mut body = String::new();
    if let Some(error) = error {
        body.push_str(&banner("error", error));
    }
    let (service_key, title, url, description, tags) = match form {
        Some(form) => (
            form.service_key.as_str(),
            form.title.as_str(),
            form.url.as_str(),
            form.description.as_str(),
            form.tags.as_str(),
        ),
        None => ("", "", "", "", ""),
    };
    body.push_str("<form hx-post=\"/kb/entries\" hx-target=\"#modal\">");
    body.push_str("<label>Service</label><select name=\"service_key\">");
    for (key, display) in options {
        let selected = if key == service_key { " selected" } else { "" };
        body.push_str(&format!(
            "<option value=\"{}\"{selected}>{}</option>",
            escape_html(key),
            escape_html(display)
        ));
    }
    body.push_str("</select>");
    body.push_str(&text_input("title", "Title", title));
    body.push_str(&text_input("url", "URL", url));
    body.push_str(&format!(
        "<label>Description</label><textarea name=\"description\" rows=\"3\">{}</textarea>",
        escape_html(description)
    ));
    body.push_str(&text_input("tags", "Tags (comma-separated)", tags));
    body.push_str(
        "<button type=\"submit\">Create</button> \
         <button type=\"button\" class=\"secondary\" hx-on:click=\"document.querySelector('.modal-backdrop').remove()\">Cancel</button>",
    );
    body.push_str("</form>");
    modal("Add Entry", &body)
}

/// Inputs come from the form (submitted values on a re-render), the
/// hidden `original_*` baseline stays whatever the form carried.
pub fn edit_modal(id: &str, form: &EditEntryForm, notice: Option<(&str, &str)>) -> String {
    let mut body = String::new();
    if let Some((kind, message)) = notice {
        body.push_str(&banner(kind, message));
    }
    body.push_str(&format!(
        "<form hx-post=\"/kb/entries/{}\" hx-target=\"#modal\">",
        escape_html(id)
    ));
    body.push_str(&text_input("title", "Title", &form.title));
    body.push_str(&text_input("url", "URL", &form.url));
    body.push_str(&format!(
        "<label>Description</label><textarea name=\"description\" rows=\"3\">{}</textarea>",
        escape_html(&form.description)
    ));
    body.push_str(&text_input("tags", "Tags (comma-separated)", &form.tags));
    for (name, value) in [
        ("original_title", form.original_title.as_str()),
        ("original_url", form.original_url.as_str()),
        ("original_description", form.original_description.as_str()),
        ("original_tags", form.original_tags.as_str()),
    ] {
        body.push_str(&format!(
            "<input type=\"hidden\" name=\"{name}\" value=\"{}\" />",
            escape_html(value)
        ));
    }
    body.push_str(
        "<button type=\"submit\">Save</button> \
         <button type=\"button\" class=\"secondary\" hx-on:click=\"document.querySelector('.modal-backdrop').remove()\">Cancel</button>",
    );
    body.push_str("</form>");
    modal("Edit Entry", &body)
}

pub fn delete_modal(entry: &KbEntry) -> String {
    let body = format!(
        "<p>Delete <strong>{}</strong>? This cannot be undone.</p>\
         <form hx-post=\"/kb/entries/{}/delete\" hx-target=\"#modal\">\
         <button type=\"submit\">Delete</button> \
         <button type=\"button\" class=\"secondary\" hx-on:click=\"document.querySelector('.modal-backdrop').remove()\">Cancel</button>\
         </form>",
        escape_html(&entry.title),
        escape_html(&entry.id)
    );
    modal("Delete Entry", &body)
}

pub fn error_modal(message: &str) -> String {
    modal("Error", &banner("error", message))
}

fn text_input(name: &str, label: &str, value: &str) -> String {
    format!(
        "<label>{label}</label><input type=\"text\" name=\"{name}\" value=\"{}\" />",
        escape_html(value)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, service_key: &str, title: &str) -> KbEntry {
        KbEntry {
            id: id.to_string(),
            service_key: service_key.to_string(),
            title: title.to_string(),
            url: String::new(),
            description: String::new(),
            tags: vec![],
        }
    }

    #[test]
    fn groups_sort_by_display_name_and_keep_backend_order() {
        let entries = vec![
            entry("kb-1", "joule", "J one"),
            entry("kb-2", "ai_core", "C one"),
            entry("kb-3", "joule", "J two"),
        ];
        let names = service_name_map(&[]);
        let groups = grouped(&entries, &names);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "SAP AI Core");
        assert_eq!(groups[1].0, "SAP Joule");
        let joule_ids: Vec<&str> = groups[1].1.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(joule_ids, vec!["kb-1", "kb-3"]);
    }

    #[test]
    fn unknown_service_groups_under_its_key() {
        let entries = vec![entry("kb-9", "mystery", "M")];
        let names = service_name_map(&[]);
        let groups = grouped(&entries, &names);
        assert_eq!(groups[0].0, "mystery");
    }

    #[test]
    fn empty_entry_list_shows_placeholder() {
        let html = page(&Ok(vec![]), &Ok(vec![]), None);
        assert!(html.contains("No entries found."));
        assert!(!html.contains("Try selecting a different service."));
    }

    #[test]
    fn filtered_empty_list_suggests_other_services() {
        let html = page(&Ok(vec![]), &Ok(vec![]), Some("joule"));
        assert!(html.contains("No entries found. Try selecting a different service."));
    }

    #[test]
    fn stats_mark_filtered_counts() {
        let entries = vec![entry("kb-1", "joule", "Joule overview")];
        let filtered = page(&Ok(vec![]), &Ok(entries.clone()), Some("joule"));
        assert!(filtered.contains("1 entries across 1 services (filtered)"));
        let unfiltered = page(&Ok(vec![]), &Ok(entries), None);
        assert!(unfiltered.contains("1 entries across 1 services</p>"));
    }

    #[test]
    fn entries_error_renders_banner() {
        let html = page(
            &Ok(vec![]),
            &Err(ApiError::new("Failed to fetch KB entries: 502")),
            None,
        );
        assert!(html.contains("Failed to load entries: Failed to fetch KB entries: 502"));
    }

    #[test]
    fn edit_modal_carries_original_values() {
        let mut e = entry("kb-1", "ai_core", "Deploying models");
        e.tags = vec!["deployment".to_string(), "gpu".to_string()];
        let html = edit_modal(&e.id, &EditEntryForm::from_entry(&e), None);
        assert!(html.contains("name=\"original_title\" value=\"Deploying models\""));
        assert!(html.contains("name=\"original_tags\" value=\"deployment, gpu\""));
        assert!(html.contains("hx-post=\"/kb/entries/kb-1\""));
    }

    #[test]
    fn edit_modal_rerender_keeps_submitted_values() {
        let form = EditEntryForm {
            title: String::new(),
            url: "https://help.sap.com/new".to_string(),
            description: "rewritten description".to_string(),
            tags: "deployment, serving".to_string(),
            original_title: "Deploying models".to_string(),
            original_url: "https://help.sap.com/old".to_string(),
            original_description: "old description".to_string(),
            original_tags: "deployment".to_string(),
        };
        let html = edit_modal("kb-1", &form, Some(("error", "Title is required.")));
        assert!(html.contains("Title is required."));
        assert!(html.contains("name=\"url\" value=\"https://help.sap.com/new\""));
        assert!(html.contains("name=\"tags\" value=\"deployment, serving\""));
        assert!(html.contains("rewritten description"));
        assert!(html.contains("name=\"original_url\" value=\"https://help.sap.com/old\""));
        assert!(html.contains("name=\"original_tags\" value=\"deployment\""));
    }

    #[test]
    fn create_modal_preserves_input_on_error() {
        let form = CreateEntryForm {
            service_key: "joule".to_string(),
            title: String::new(),
            url: "https://help.sap.com".to_string(),
            description: String::new(),
            tags: "chat".to_string(),
        };
        let options = service_options(&Ok(vec![]));
        let html = create_modal(&options, Some(&form), Some("Title is required."));
        assert!(html.contains("Title is required."));
        assert!(html.contains("value=\"https://help.sap.com\""));
        assert!(html.contains("value=\"joule\" selected"));
    }

    #[test]
    fn filter_select_marks_active_service() {
        let html = page(&Ok(vec![]), &Ok(vec![]), Some("joule"));
        assert!(html.contains("value=\"joule\" selected"));
    }
}

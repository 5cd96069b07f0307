use web_sys as web;

fn set_hidden(document: &web::Document, id: &str, hidden: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let cl = el.class_list();
        if hidden {
            _ = cl.add_1("hidden");
            _ = el.set_attribute("style", "display:none");
        } else {
            _ = cl.remove_1("hidden");
            _ = el.set_attribute("style", "");
        }
    }
}

fn is_hidden(document: &web::Document, id: &str) -> bool {
    if let Some(el) = document.get_element_by_id(id) {
        if el.class_list().contains("hidden") {
            return true;
        }
        return el
            .get_attribute("style")
            .map(|s| s.contains("display:none"))
            .unwrap_or(false);
    }
    false
}

#[inline]
pub fn hide_start(document: &web::Document) {
    set_hidden(document, "start-overlay", true);
}

/// Show or hide the keyboard help panel.
pub fn toggle_help(document: &web::Document) {
    let hidden = is_hidden(document, "help-overlay");
    set_hidden(document, "help-overlay", !hidden);
}

/// Mark the navigation button of the mounted chamber.
pub fn set_active_nav(document: &web::Document, active_id: &str, all_ids: &[&str]) {
    for id in all_ids {
        if let Some(el) = document.get_element_by_id(&format!("nav-{id}")) {
            let cl = el.class_list();
            if *id == active_id {
                _ = cl.add_1("active");
            } else {
                _ = cl.remove_1("active");
            }
        }
    }
}

/// Status line shown over the canvas: `LABEL | status`.
pub fn update_hud(hud: &web::Element, label: &str, status: &str) {
    let text = if status.is_empty() {
        label.to_string()
    } else {
        format!("{label} | {status}")
    };
    hud.set_text_content(Some(&text));
}

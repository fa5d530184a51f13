/// Which look the pages get. Both skins render the same pages and flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Skin {
    #[default]
    Desktop,
    Mobile,
}

/// Class names and assets a template needs for one skin.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub name: &'static str,
    pub stylesheet: &'static str,
    pub body_class: &'static str,
    pub card_class: &'static str,
    pub primary_button: &'static str,
    pub secondary_button: &'static str,
    pub danger_button: &'static str,
    pub input_class: &'static str,
    badge_prefix: &'static str,
}

impl Theme {
    pub fn badge(&self, tone: &str) -> String {
        return format!("{}{tone}", self.badge_prefix);
    }
}

impl Skin {
    pub fn parse(value: &str) -> Option<Self> {
        return match value.trim().to_lowercase().as_str() {
            "desktop" => Some(Skin::Desktop),
            "mobile" => Some(Skin::Mobile),
            _ => None,
        };
    }

    pub fn theme(&self) -> Theme {
        return match self {
            Skin::Desktop => Theme {
                name: "desktop",
                stylesheet: "/assets/desktop.css",
                body_class: "container py-4",
                card_class: "card shadow-sm",
                primary_button: "btn btn-primary",
                secondary_button: "btn btn-outline-secondary",
                danger_button: "btn btn-outline-danger",
                input_class: "form-control",
                badge_prefix: "badge bg-",
            },
            Skin::Mobile => Theme {
                name: "mobile",
                stylesheet: "/assets/mobile.css",
                body_class: "ion-page",
                card_class: "ion-item",
                primary_button: "ion-button ion-button-full",
                secondary_button: "ion-button ion-button-clear",
                danger_button: "ion-button ion-color-danger",
                input_class: "ion-input",
                badge_prefix: "ion-chip ion-color-",
            },
        };
    }
}

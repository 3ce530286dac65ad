use serde::Serialize;

/// Short notification shown next to a page transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastVariant {
    Default,
    Destructive,
}

impl Toast {
    pub fn info(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            variant: ToastVariant::Default,
        }
    }

    pub fn destructive(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            variant: ToastVariant::Destructive,
        }
    }
}

/// Result of a user action: where the client should go next, if anywhere.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toast: Option<Toast>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NavigationDto {
    pub fn redirect(to: impl Into<String>, toast: Option<Toast>) -> Self {
        Self {
            redirect_to: Some(to.into()),
            toast,
            error: None,
        }
    }

    pub fn stay(error: impl Into<String>, toast: Option<Toast>) -> Self {
        Self {
            redirect_to: None,
            toast,
            error: Some(error.into()),
        }
    }

    pub fn notify(toast: Toast) -> Self {
        Self {
            redirect_to: None,
            toast: Some(toast),
            error: None,
        }
    }
}

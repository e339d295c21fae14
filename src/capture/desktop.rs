use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayServer {
    Wayland,
    X11,
    Unknown,
}

impl std::fmt::Display for DisplayServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayServer::Wayland => write!(f, "Wayland"),
            DisplayServer::X11 => write!(f, "X11"),
            DisplayServer::Unknown => write!(f, "Unknown"),
        }
    }
}

impl DisplayServer {
    /// Detect the display server of the current process environment.
    pub fn detect() -> Self {
        Self::detect_with(|key| env::var(key).ok())
    }

    /// Detect the display server using `lookup` in place of the process
    /// environment.
    ///
    /// `XDG_SESSION_TYPE` wins when it names a known server, then
    /// `WAYLAND_DISPLAY`, then `DISPLAY`.
    pub fn detect_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(session_type) = lookup("XDG_SESSION_TYPE") {
            match session_type.to_lowercase().as_str() {
                "wayland" => return DisplayServer::Wayland,
                "x11" => return DisplayServer::X11,
                _ => {}
            }
        }

        if lookup("WAYLAND_DISPLAY").is_some() {
            return DisplayServer::Wayland;
        }

        if lookup("DISPLAY").is_some() {
            return DisplayServer::X11;
        }

        DisplayServer::Unknown
    }

    pub fn is_known(&self) -> bool {
        *self != DisplayServer::Unknown
    }
}

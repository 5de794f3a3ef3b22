//! Derives the functional location and asset names from the host name.
//!
//! Devices are named `<functional_location>-<asset>`, e.g. `server_room-rack_1`, so the
//! host name alone tells which part of the hierarchy a device belongs to.

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HostNameError {
    #[error("Host name is not valid UTF-8")]
    NotUtf8,
    #[error(
        "Host name '{0}' does not follow '<functional_location>-<asset>'; pass --functional-location and --asset instead"
    )]
    UnexpectedFormat(String),
}

/// Turns a host name token into a display name: `server_room` becomes `Server Room`.
pub fn to_title(name: &str) -> String {
    name.replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits `host` into the functional location and asset display names.
pub fn names_from_host(host: &str) -> Result<(String, String), HostNameError> {
    let mut tokens = host.split('-').map(str::trim);

    match (tokens.next(), tokens.next()) {
        (Some(location), Some(asset)) if !location.is_empty() && !asset.is_empty() => {
            Ok((to_title(location), to_title(asset)))
        }
        _ => Err(HostNameError::UnexpectedFormat(host.to_string())),
    }
}

/// Reads the host name of this machine and splits it with [`names_from_host`].
pub fn names_from_local_host() -> Result<(String, String), HostNameError> {
    let host = gethostname::gethostname()
        .into_string()
        .map_err(|_| HostNameError::NotUtf8)?;

    names_from_host(&host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_cases_each_word() {
        assert_eq!(to_title("server_room"), "Server Room");
        assert_eq!(to_title("rack_1"), "Rack 1");
        assert_eq!(to_title("hOT_room"), "HOT Room");
    }

    #[test]
    fn host_name_yields_both_names() {
        assert_eq!(
            names_from_host("server_room-rack_1"),
            Ok(("Server Room".to_string(), "Rack 1".to_string()))
        );
    }

    #[test]
    fn extra_tokens_are_ignored() {
        assert_eq!(
            names_from_host("lab-pump_3-eth0"),
            Ok(("Lab".to_string(), "Pump 3".to_string()))
        );
    }

    #[test]
    fn host_name_without_separator_is_rejected() {
        assert_eq!(
            names_from_host("localhost"),
            Err(HostNameError::UnexpectedFormat("localhost".to_string()))
        );
        assert!(names_from_host("room-").is_err());
    }
}

use anyhow::bail;

pub const SHARED_PASSWORD: &str = "olimpiadi2040";

#[derive(Debug, Clone)]
pub struct Session {
    pub user: String,
    pub session_name: String,
}

pub fn authenticate(user: &str, password: &str, session_name: &str) -> anyhow::Result<Session> {
    if password != SHARED_PASSWORD {
        bail!("invalid credentials");
    }
    let user = user.trim().to_uppercase();
    if user.is_empty() {
        bail!("athlete name must not be empty");
    }
    Ok(Session {
        user,
        session_name: session_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_password() {
        assert!(authenticate("MARIO", "letmein", "Standard Practice").is_err());
    }

    #[test]
    fn rejects_blank_athlete_name() {
        assert!(authenticate("   ", SHARED_PASSWORD, "Standard Practice").is_err());
    }

    #[test]
    fn normalizes_athlete_name() {
        let session = authenticate("  mario ", SHARED_PASSWORD, "Evening drills").unwrap();
        assert_eq!(session.user, "MARIO");
        assert_eq!(session.session_name, "Evening drills");
    }
}

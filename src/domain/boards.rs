#[derive(Debug, Clone)]
pub struct Board {
    pub id: i32,
    pub name: String,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub created_by: i32,
}

/// Membership of a user on a board. `(board_id, user_id)` is the key.
#[derive(Debug, Clone)]
pub struct BoardUser {
    pub board_id: i32,
    pub user_id: i32,
    pub role: Role,
    pub starred: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Owner,
    Editor,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
        }
    }

    pub fn parse(s: &str) -> anyhow::Result<Role> {
        match s {
            "owner" => Ok(Role::Owner),
            "editor" => Ok(Role::Editor),
            "viewer" => Ok(Role::Viewer),
            other => anyhow::bail!("unknown role: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips() {
        for role in [Role::Owner, Role::Editor, Role::Viewer] {
            assert_eq!(Role::parse(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(Role::parse("admin").is_err());
    }
}

//! Per-content-type role check, done before any comment UI is shown.
//!
//! The table is configuration data, not logic: each content kind lists the
//! roles allowed to see and join its comment threads. Denial is a display
//! state ("no permission" panel), never an error.

use std::collections::HashMap;

use crate::api::{ContentKind, Role};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Access {
    Granted,
    Denied,
}

lazy_static::lazy_static! {
    static ref ALLOWED_ROLES: HashMap<ContentKind, &'static [Role]> = {
        use ContentKind::*;
        use Role::*;
        let mut m = HashMap::new();
        m.insert(Session, &[Admin, Guide, Scholar, Member][..]);
        m.insert(GuideSession, &[Guide, Admin][..]);
        m.insert(ScholarIdeasLab, &[Scholar, Admin][..]);
        m.insert(IdeaLab, &[Scholar, Member, Admin][..]);
        m
    };
}

pub fn check(kind: ContentKind, role: Option<Role>) -> Access {
    let allowed: &[Role] = ALLOWED_ROLES.get(&kind).copied().unwrap_or(&[]);
    match role {
        Some(r) if allowed.contains(&r) => Access::Granted,
        _ => Access::Denied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guide_sessions_are_guide_and_admin_only() {
        assert_eq!(check(ContentKind::GuideSession, Some(Role::Guide)), Access::Granted);
        assert_eq!(check(ContentKind::GuideSession, Some(Role::Admin)), Access::Granted);
        assert_eq!(check(ContentKind::GuideSession, Some(Role::Scholar)), Access::Denied);
        assert_eq!(check(ContentKind::GuideSession, Some(Role::Member)), Access::Denied);
    }

    #[test]
    fn scholar_ideas_lab_is_scholar_and_admin_only() {
        assert_eq!(
            check(ContentKind::ScholarIdeasLab, Some(Role::Scholar)),
            Access::Granted
        );
        assert_eq!(check(ContentKind::ScholarIdeasLab, Some(Role::Admin)), Access::Granted);
        assert_eq!(check(ContentKind::ScholarIdeasLab, Some(Role::Guide)), Access::Denied);
    }

    #[test]
    fn sessions_are_open_to_every_role() {
        for role in [Role::Admin, Role::Guide, Role::Scholar, Role::Member] {
            assert_eq!(check(ContentKind::Session, Some(role)), Access::Granted);
        }
    }

    #[test]
    fn no_role_is_always_denied() {
        for kind in [
            ContentKind::Session,
            ContentKind::GuideSession,
            ContentKind::ScholarIdeasLab,
            ContentKind::IdeaLab,
        ] {
            assert_eq!(check(kind, None), Access::Denied);
        }
    }
}

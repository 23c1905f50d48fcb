use std::str::FromStr;

#[derive(
    Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct ContentId(pub String);

impl ContentId {
    pub fn stub() -> ContentId {
        ContentId(String::from("content-stub"))
    }
}

/// Kind of commentable content. The backend sends these as snake_case
/// strings, and the access gate keys its role table on them.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Session,
    GuideSession,
    ScholarIdeasLab,
    IdeaLab,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Session => "session",
            ContentKind::GuideSession => "guide_session",
            ContentKind::ScholarIdeasLab => "scholar_ideas_lab",
            ContentKind::IdeaLab => "idea_lab",
        }
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<ContentKind, String> {
        match s {
            "session" => Ok(ContentKind::Session),
            "guide_session" => Ok(ContentKind::GuideSession),
            "scholar_ideas_lab" => Ok(ContentKind::ScholarIdeasLab),
            "idea_lab" => Ok(ContentKind::IdeaLab),
            _ => Err(format!("unknown content kind {s:?}")),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Guide,
    Scholar,
    Member,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Role, String> {
        match s {
            "admin" => Ok(Role::Admin),
            "guide" => Ok(Role::Guide),
            "scholar" => Ok(Role::Scholar),
            "member" => Ok(Role::Member),
            _ => Err(format!("unknown role {s:?}")),
        }
    }
}

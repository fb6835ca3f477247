//! Teams and judges

use serde::{Deserialize, Serialize};

use super::{Collection, Entity, require_optional_text, require_text};
use crate::errors::{SharedError, SharedResult};

/// A registered hackathon team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub team_name: String,
    pub member_count: u32,
    pub contact_email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTeam {
    pub team_name: String,
    pub member_count: u32,
    pub contact_email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TeamPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}

fn validate_member_count(count: u32) -> SharedResult<()> {
    if count == 0 {
        return Err(SharedError::invalid("memberCount", "must be a positive integer"));
    }
    Ok(())
}

fn validate_email(email: &str) -> SharedResult<()> {
    require_text("contactEmail", email)?;
    if !email.contains('@') {
        return Err(SharedError::invalid("contactEmail", "must be an email address"));
    }
    Ok(())
}

impl Entity for Team {
    type New = NewTeam;
    type Patch = TeamPatch;

    const COLLECTION: Collection = Collection::Teams;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.team_name
    }

    fn validate_new(new: &NewTeam) -> SharedResult<()> {
        require_text("teamName", &new.team_name)?;
        validate_member_count(new.member_count)?;
        validate_email(&new.contact_email)
    }

    fn validate_patch(patch: &TeamPatch) -> SharedResult<()> {
        require_optional_text("teamName", patch.team_name.as_ref())?;
        if let Some(count) = patch.member_count {
            validate_member_count(count)?;
        }
        if let Some(email) = &patch.contact_email {
            validate_email(email)?;
        }
        Ok(())
    }
}

/// A judge who scores submissions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Judge {
    pub id: String,
    pub judge_name: String,
    pub expertise: String,
    pub organization: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJudge {
    pub judge_name: String,
    pub expertise: String,
    pub organization: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JudgePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judge_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expertise: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

impl Entity for Judge {
    type New = NewJudge;
    type Patch = JudgePatch;

    const COLLECTION: Collection = Collection::Judges;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.judge_name
    }

    fn validate_new(new: &NewJudge) -> SharedResult<()> {
        require_text("judgeName", &new.judge_name)?;
        require_text("expertise", &new.expertise)?;
        require_text("organization", &new.organization)
    }

    fn validate_patch(patch: &JudgePatch) -> SharedResult<()> {
        require_optional_text("judgeName", patch.judge_name.as_ref())?;
        require_optional_text("expertise", patch.expertise.as_ref())?;
        require_optional_text("organization", patch.organization.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{parse_payload, to_document};

    #[test]
    fn test_team_wire_names() {
        let team = Team {
            id: "t1".to_string(),
            team_name: "Smart Transit Innovators".to_string(),
            member_count: 5,
            contact_email: "team@smarttransit.com".to_string(),
        };
        let json = serde_json::to_value(&team).unwrap();
        assert_eq!(json["teamName"], "Smart Transit Innovators");
        assert_eq!(json["memberCount"], 5);
        assert_eq!(json["contactEmail"], "team@smarttransit.com");
    }

    #[test]
    fn test_new_team_validation() {
        let ok: NewTeam = parse_payload(
            Collection::Teams,
            br#"{"teamName":"A","memberCount":3,"contactEmail":"a@b.io"}"#,
        )
        .unwrap();
        assert!(Team::validate_new(&ok).is_ok());

        let zero = NewTeam { member_count: 0, ..ok.clone() };
        assert!(matches!(Team::validate_new(&zero), Err(SharedError::InvalidField { .. })));

        let blank = NewTeam { team_name: "  ".to_string(), ..ok.clone() };
        assert!(matches!(Team::validate_new(&blank), Err(SharedError::MissingField { .. })));

        let missing: SharedResult<NewTeam> = parse_payload(Collection::Teams, br#"{"teamName":"A"}"#);
        assert!(matches!(missing, Err(SharedError::DeserializationError { .. })));

        let negative: SharedResult<NewTeam> = parse_payload(
            Collection::Teams,
            br#"{"teamName":"A","memberCount":-2,"contactEmail":"a@b.io"}"#,
        );
        assert!(negative.is_err());
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let patch = TeamPatch {
            member_count: Some(4),
            ..Default::default()
        };
        let doc = to_document(&patch).unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc["memberCount"], 4);
    }

    #[test]
    fn test_patch_rejects_id() {
        let result: SharedResult<JudgePatch> = parse_payload(Collection::Judges, br#"{"id":"other"}"#);
        assert!(result.is_err());
    }
}

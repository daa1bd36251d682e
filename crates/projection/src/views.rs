//! Typed public views: the only serializable surface for public payloads.
//!
//! Each view struct is structurally incapable of holding a forbidden field —
//! the guarantee holds in production builds, not only under a debug flag. A
//! new entity field becomes visible only by deliberately adding it to the
//! view here.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use congregate_core::{OrgId, UserId};
use congregate_gating::Organization;

use crate::entities::{Leader, OrgEvent, Post, Sermon, UserProfile};
use crate::guard::Projectable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationProfileView {
    pub id: OrgId,
    pub slug: String,
    pub name: String,
    pub about: Option<String>,
    pub city: Option<String>,
    pub website: Option<String>,
}

impl Projectable for Organization {
    type View = OrganizationProfileView;

    fn view(&self) -> Self::View {
        OrganizationProfileView {
            id: self.id,
            slug: self.slug.clone(),
            name: self.name.clone(),
            about: self.about.clone(),
            city: self.city.clone(),
            website: self.website.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SermonView {
    pub id: Uuid,
    pub title: String,
    pub speaker: String,
    pub delivered_at: DateTime<Utc>,
    pub video_url: Option<String>,
}

impl Projectable for Sermon {
    type View = SermonView;

    fn view(&self) -> Self::View {
        SermonView {
            id: self.id,
            title: self.title.clone(),
            speaker: self.speaker.clone(),
            delivered_at: self.delivered_at,
            video_url: self.video_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderView {
    pub id: Uuid,
    pub name: String,
    pub title: String,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
}

impl Projectable for Leader {
    type View = LeaderView;

    fn view(&self) -> Self::View {
        LeaderView {
            id: self.id,
            name: self.name.clone(),
            title: self.title.clone(),
            bio: self.bio.clone(),
            photo_url: self.photo_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    pub id: Uuid,
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl Projectable for OrgEvent {
    type View = EventView;

    fn view(&self) -> Self::View {
        EventView {
            id: self.id,
            title: self.title.clone(),
            starts_at: self.starts_at,
            location: self.location.clone(),
            description: self.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub published_at: DateTime<Utc>,
}

impl Projectable for Post {
    type View = PostView;

    fn view(&self) -> Self::View {
        PostView {
            id: self.id,
            title: self.title.clone(),
            body: self.body.clone(),
            published_at: self.published_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreviewView {
    pub id: UserId,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

impl Projectable for UserProfile {
    type View = UserPreviewView;

    fn view(&self) -> Self::View {
        UserPreviewView {
            id: self.id,
            display_name: self.display_name.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

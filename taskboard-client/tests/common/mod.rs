//! Shared fixtures for client tests

#![allow(dead_code)]

use chrono::Utc;
use taskboard_shared::models::{
    task::{Task, TaskPriority, TaskStatus},
    user::PublicUser,
};
use uuid::Uuid;

pub fn user() -> PublicUser {
    PublicUser {
        id: Uuid::new_v4(),
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
    }
}

pub fn task(owner: Uuid, title: &str, priority: TaskPriority, status: TaskStatus) -> Task {
    let now = Utc::now();
    Task {
        id: Uuid::new_v4(),
        owner,
        title: title.to_string(),
        description: None,
        due_date: None,
        priority,
        status,
        created_at: now,
        updated_at: now,
    }
}

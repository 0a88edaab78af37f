use std::marker::PhantomData;

use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    client::ApiClient,
    errors::AppResult,
    models::{
        domain::{Achievement, Category, Question, Quiz},
        dto::{
            request::{
                AchievementRequest, CategoryRequest, CreateQuestionRequest, CreateQuizRequest,
                UpdateQuestionRequest, UpdateQuizRequest,
            },
            response::MessageResponse,
        },
    },
};

/// An entity managed through the standard admin routes under `PATH`.
pub trait ApiResource: DeserializeOwned {
    const PATH: &'static str;
    type Create: Serialize + Sync;
    type Update: Serialize + Sync;
}

impl ApiResource for Quiz {
    const PATH: &'static str = "quizzes";
    type Create = CreateQuizRequest;
    type Update = UpdateQuizRequest;
}

/// Questions have no top-level listing; use [`ApiClient::questions`].
impl ApiResource for Question {
    const PATH: &'static str = "questions";
    type Create = CreateQuestionRequest;
    type Update = UpdateQuestionRequest;
}

impl ApiResource for Category {
    const PATH: &'static str = "categories";
    type Create = CategoryRequest;
    type Update = CategoryRequest;
}

impl ApiResource for Achievement {
    const PATH: &'static str = "achievements";
    type Create = AchievementRequest;
    type Update = AchievementRequest;
}

/// CRUD calls for one entity type, sharing the client's connection and token.
pub struct ResourceClient<T> {
    api: ApiClient,
    _resource: PhantomData<fn() -> T>,
}

impl<T: ApiResource> ResourceClient<T> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<T>> {
        self.api.send(self.api.request(Method::GET, T::PATH)).await
    }

    pub async fn get(&self, id: &str) -> AppResult<T> {
        self.api.send(self.api.request(Method::GET, &item_path::<T>(id))).await
    }

    pub async fn create(&self, request: &T::Create) -> AppResult<T> {
        self.api
            .send(self.api.request(Method::POST, T::PATH).json(request))
            .await
    }

    pub async fn update(&self, id: &str, request: &T::Update) -> AppResult<T> {
        self.api
            .send(self.api.request(Method::PUT, &item_path::<T>(id)).json(request))
            .await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let _: MessageResponse = self
            .api
            .send(self.api.request(Method::DELETE, &item_path::<T>(id)))
            .await?;
        Ok(())
    }
}

fn item_path<T: ApiResource>(id: &str) -> String {
    format!("{}/{}", T::PATH, id)
}

impl ApiClient {
    pub fn resource<T: ApiResource>(&self) -> ResourceClient<T> {
        ResourceClient::new(self.clone())
    }
}

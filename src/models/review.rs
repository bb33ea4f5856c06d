use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// Tipo de autor da review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum UserType {
    General,
    Client,
}

impl UserType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "General" => Some(UserType::General),
            "Client" => Some(UserType::Client),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::General => "General",
            UserType::Client => "Client",
        }
    }
}

/// Review (armazenada no MongoDB, coleção `reviews`)
///
/// Documentos são imutáveis depois de criados.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub name: String,

    /// Sempre em minúsculas
    pub email: String,

    /// String vazia quando não informado
    pub phone: String,

    pub subject: String,

    pub message: String,

    /// 1 a 5
    pub rating: i32,

    pub terms_accepted: bool,

    /// Referências ao asset externo (upload de imagem)
    pub image: Option<String>,
    pub public_id: Option<String>,

    pub user_type: UserType,

    /// Preenchido apenas para `Client`
    pub user_id: Option<String>,

    /// Vazio para `General`
    pub rank_and_position: String,

    /// Flag de moderação; nunca definida na criação
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,

    pub created_at: DateTime,
}

/// Review já validada e normalizada, pronta para ser persistida
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub rating: i32,
    pub image: Option<String>,
    pub public_id: Option<String>,
    pub author: ReviewAuthor,
}

/// Autor da review. Só `Client` carrega identificação.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewAuthor {
    General,
    Client {
        user_id: String,
        rank_and_position: String,
    },
}

impl NewReview {
    pub fn into_review(self, created_at: DateTime) -> Review {
        let (user_type, user_id, rank_and_position) = match self.author {
            ReviewAuthor::General => (UserType::General, None, String::new()),
            ReviewAuthor::Client {
                user_id,
                rank_and_position,
            } => (UserType::Client, Some(user_id), rank_and_position),
        };

        Review {
            id: None,
            name: self.name,
            email: self.email,
            phone: self.phone,
            subject: self.subject,
            message: self.message,
            rating: self.rating,
            terms_accepted: true,
            image: self.image,
            public_id: self.public_id,
            user_type,
            user_id,
            rank_and_position,
            status: None,
            created_at,
        }
    }
}

/// Response de review (id como string hex, data em RFC 3339)
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub rating: i32,
    pub terms_accepted: bool,
    pub image: Option<String>,
    pub public_id: Option<String>,
    pub user_type: UserType,
    pub user_id: Option<String>,
    pub rank_and_position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
    pub created_at: String,
}

impl From<Review> for ReviewResponse {
    fn from(r: Review) -> Self {
        ReviewResponse {
            id: r.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: r.name,
            email: r.email,
            phone: r.phone,
            subject: r.subject,
            message: r.message,
            rating: r.rating,
            terms_accepted: r.terms_accepted,
            image: r.image,
            public_id: r.public_id,
            user_type: r.user_type,
            user_id: r.user_id,
            rank_and_position: r.rank_and_position,
            status: r.status,
            created_at: r.created_at.try_to_rfc3339_string().unwrap_or_default(),
        }
    }
}

/// Página de reviews devolvida pelo GET
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewListResponse {
    pub reviews: Vec<ReviewResponse>,
    pub total_pages: u64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CreateReviewResponse {
    pub success: bool,
    pub message: String,
    pub id: String,
}

//! # HubSpot OAuth2 Authentication Module
//!
//! Fluxo authorization-code com o HubSpot e ciclo de vida dos tokens.
//!
//! ## Responsabilidades:
//! - Gerar a URL de autorização (com `state` assinado identificando o tenant)
//! - Trocar authorization code por access/refresh token
//! - Persistir tokens no key-value store (access com TTL, refresh sem)
//! - Fornecer um access token válido, renovando via refresh token quando ausente
//!
//! ## Estrutura:
//! - `config.rs`: Configurações OAuth2 e URL de autorização
//! - `client.rs`: Cliente HTTP do endpoint de token
//! - `state.rs`: Codificação/verificação do parâmetro `state`
//! - `token_manager.rs`: Persistência, refresh e resolução de credenciais
//! - `handlers.rs`: Handlers HTTP (authorize, callback)

pub mod client;
pub mod config;
pub mod handlers;
pub mod state;
pub mod token_manager;

pub use client::{OAuth2Client, TokenResponse};
pub use config::OAuth2Config;
pub use handlers::{authorize, oauth2_callback};
pub use token_manager::TokenManager;

/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: 認証必須 route 用 (route_layer)
 * - http / cors / security_headers: Router 全体に掛ける横断的関心事
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;

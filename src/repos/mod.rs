/*
 * Responsibility
 * - repository の公開インターフェース (trait + Postgres 実装の re-export)
 * - handler は trait object (Arc<dyn ...>) だけを見る
 */
pub mod dica_repo;
pub mod error;
pub mod tema_repo;
pub mod user_repo;

pub use dica_repo::{DicaChanges, DicaFilter, DicaRepository, DicaRow, NewDica, PgDicaRepository};
pub use tema_repo::{PgTemaRepository, SubtemaRow, TemaRepository, TemaRow};
pub use user_repo::{PgUserRepository, UserChanges, UserRepository, UserRow};

use actix_web::web;
use billsight_common::db::Database;

use crate::chat::service::ChatService;

pub fn configure(config: &mut web::ServiceConfig, db: Database, chat: ChatService) {
    crate::dashboard::endpoints::configure(config, db);
    crate::chat::endpoints::configure(config, chat);
}

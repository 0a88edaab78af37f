pub mod achievement_handler;
pub mod analytics_handler;
pub mod category_handler;
pub mod health_handler;
pub mod question_handler;
pub mod quiz_handler;
pub mod result_handler;
pub mod settings_handler;
pub mod user_handler;

use actix_web::web;

/// Registers every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_handler::health_check)
        .service(health_handler::health_check_live)
        .service(health_handler::health_check_ready)
        .service(quiz_handler::list_quizzes)
        .service(quiz_handler::get_quiz)
        .service(quiz_handler::get_quiz_questions)
        .service(quiz_handler::create_quiz)
        .service(quiz_handler::update_quiz)
        .service(quiz_handler::delete_quiz)
        .service(question_handler::create_question)
        .service(question_handler::update_question)
        .service(question_handler::delete_question)
        .service(result_handler::submit_result)
        .service(result_handler::get_user_results)
        .service(result_handler::get_leaderboard)
        .service(category_handler::list_categories)
        .service(category_handler::get_category)
        .service(category_handler::create_category)
        .service(category_handler::update_category)
        .service(category_handler::delete_category)
        .service(achievement_handler::list_achievements)
        .service(achievement_handler::get_achievement)
        .service(achievement_handler::create_achievement)
        .service(achievement_handler::update_achievement)
        .service(achievement_handler::delete_achievement)
        .service(user_handler::get_me)
        .service(user_handler::list_users)
        .service(user_handler::update_user)
        .service(settings_handler::list_settings)
        .service(settings_handler::update_setting)
        .service(analytics_handler::overview)
        .service(analytics_handler::quiz_performance)
        .service(analytics_handler::user_activity);
}

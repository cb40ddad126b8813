pub mod wellness_score;

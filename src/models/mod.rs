pub mod generation_state;
pub mod point_of_interest;
pub mod tour;

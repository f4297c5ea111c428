pub mod normalize;
pub mod passages;
pub mod stopwords;

mod derived_test;
mod predicate_test;
mod prepared_test;

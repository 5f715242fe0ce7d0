mod crud;
mod failures;
mod startup;

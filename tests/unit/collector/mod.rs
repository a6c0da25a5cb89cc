pub mod paginated_collection;

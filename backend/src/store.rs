//! Storage handle over the rental tables. Every operation goes through an
//! explicitly passed `Store`; there is no process-wide connection state.
//! Cascade semantics live here as documented operations, not as side
//! effects of the schema.

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, Utc};
use diesel::dsl::{exists, select};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db;
use crate::models::{Booking, BookingStatus, Listing, Review, User};
use crate::schema::{bookings, listings, reviews, users};

pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

pub struct NewListing {
    pub title: String,
    pub description: String,
    pub location: String,
    pub price_per_night: BigDecimal,
    pub available: bool,
    pub max_guests: i32,
}

pub struct NewBooking {
    pub listing_id: Uuid,
    pub user_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: BookingStatus,
    pub total_price: BigDecimal,
}

pub struct NewReview {
    pub listing_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub comment: String,
}

pub struct Store {
    conn: PgConnection,
}

impl Store {
    pub fn connect(database_url: &str) -> Result<Self, ConnectionError> {
        Ok(Self {
            conn: db::establish_connection(database_url)?,
        })
    }

    // --- users ---

    pub fn create_user(&mut self, fields: NewUser) -> QueryResult<User> {
        let now = Utc::now().naive_utc();
        let user = User {
            id: Uuid::new_v4(),
            username: fields.username,
            email: fields.email,
            first_name: fields.first_name,
            last_name: fields.last_name,
            created_at: now,
            updated_at: now,
        };
        diesel::insert_into(users::table)
            .values(&user)
            .execute(&mut self.conn)?;
        Ok(user)
    }

    pub fn user_by_id(&mut self, user_id: Uuid) -> QueryResult<Option<User>> {
        users::table
            .find(user_id)
            .first::<User>(&mut self.conn)
            .optional()
    }

    pub fn user_by_username(&mut self, name: &str) -> QueryResult<Option<User>> {
        users::table
            .filter(users::username.eq(name))
            .first::<User>(&mut self.conn)
            .optional()
    }

    // --- listings ---

    pub fn create_listing(&mut self, fields: NewListing) -> QueryResult<Listing> {
        let now = Utc::now().naive_utc();
        let listing = Listing {
            id: Uuid::new_v4(),
            title: fields.title,
            description: fields.description,
            location: fields.location,
            price_per_night: fields.price_per_night,
            available: fields.available,
            max_guests: fields.max_guests,
            created_at: now,
            updated_at: now,
        };
        diesel::insert_into(listings::table)
            .values(&listing)
            .execute(&mut self.conn)?;
        Ok(listing)
    }

    /// All listings, newest first.
    pub fn listings(&mut self) -> QueryResult<Vec<Listing>> {
        listings::table
            .order_by(listings::created_at.desc())
            .load::<Listing>(&mut self.conn)
    }

    pub fn listing(&mut self, listing_id: Uuid) -> QueryResult<Option<Listing>> {
        listings::table
            .find(listing_id)
            .first::<Listing>(&mut self.conn)
            .optional()
    }

    pub fn update_listing(
        &mut self,
        listing_id: Uuid,
        fields: NewListing,
    ) -> QueryResult<Option<Listing>> {
        let now = Utc::now().naive_utc();
        diesel::update(listings::table.find(listing_id))
            .set((
                listings::title.eq(fields.title),
                listings::description.eq(fields.description),
                listings::location.eq(fields.location),
                listings::price_per_night.eq(fields.price_per_night),
                listings::available.eq(fields.available),
                listings::max_guests.eq(fields.max_guests),
                listings::updated_at.eq(now),
            ))
            .get_result::<Listing>(&mut self.conn)
            .optional()
    }

    /// Deletes a listing together with its bookings and reviews in a single
    /// transaction. Returns `false` when the listing did not exist.
    pub fn delete_listing(&mut self, listing_id: Uuid) -> QueryResult<bool> {
        self.conn.transaction(|conn| {
            diesel::delete(reviews::table.filter(reviews::listing_id.eq(listing_id)))
                .execute(conn)?;
            diesel::delete(bookings::table.filter(bookings::listing_id.eq(listing_id)))
                .execute(conn)?;
            let deleted = diesel::delete(listings::table.find(listing_id)).execute(conn)?;
            Ok(deleted > 0)
        })
    }

    // --- bookings ---

    pub fn create_booking(&mut self, fields: NewBooking) -> QueryResult<Booking> {
        let now = Utc::now().naive_utc();
        let booking = Booking {
            id: Uuid::new_v4(),
            listing_id: fields.listing_id,
            user_id: fields.user_id,
            check_in: fields.check_in,
            check_out: fields.check_out,
            status: fields.status.as_str().to_string(),
            total_price: fields.total_price,
            created_at: now,
            updated_at: now,
        };
        diesel::insert_into(bookings::table)
            .values(&booking)
            .execute(&mut self.conn)?;
        Ok(booking)
    }

    pub fn booking(&mut self, booking_id: Uuid) -> QueryResult<Option<Booking>> {
        bookings::table
            .find(booking_id)
            .first::<Booking>(&mut self.conn)
            .optional()
    }

    pub fn bookings_for_user(&mut self, user_id: Uuid) -> QueryResult<Vec<Booking>> {
        bookings::table
            .filter(bookings::user_id.eq(user_id))
            .order_by(bookings::created_at.desc())
            .load::<Booking>(&mut self.conn)
    }

    pub fn update_booking_status(
        &mut self,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> QueryResult<Option<Booking>> {
        let now = Utc::now().naive_utc();
        diesel::update(bookings::table.find(booking_id))
            .set((
                bookings::status.eq(status.as_str()),
                bookings::updated_at.eq(now),
            ))
            .get_result::<Booking>(&mut self.conn)
            .optional()
    }

    pub fn booking_count(&mut self) -> QueryResult<i64> {
        bookings::table.count().get_result(&mut self.conn)
    }

    // --- reviews ---

    pub fn create_review(&mut self, fields: NewReview) -> QueryResult<Review> {
        let now = Utc::now().naive_utc();
        let review = Review {
            id: Uuid::new_v4(),
            listing_id: fields.listing_id,
            user_id: fields.user_id,
            rating: fields.rating,
            comment: fields.comment,
            created_at: now,
            updated_at: now,
        };
        diesel::insert_into(reviews::table)
            .values(&review)
            .execute(&mut self.conn)?;
        Ok(review)
    }

    /// Reviews of a listing joined with their authors, newest first.
    pub fn reviews_with_users(&mut self, listing_id: Uuid) -> QueryResult<Vec<(Review, User)>> {
        reviews::table
            .inner_join(users::table)
            .filter(reviews::listing_id.eq(listing_id))
            .order_by(reviews::created_at.desc())
            .select((reviews::all_columns, users::all_columns))
            .load::<(Review, User)>(&mut self.conn)
    }

    /// One review per (listing, user); backed by a unique index.
    pub fn review_exists(&mut self, listing_id: Uuid, user_id: Uuid) -> QueryResult<bool> {
        select(exists(
            reviews::table
                .filter(reviews::listing_id.eq(listing_id))
                .filter(reviews::user_id.eq(user_id)),
        ))
        .get_result(&mut self.conn)
    }

    pub fn review_count(&mut self) -> QueryResult<i64> {
        reviews::table.count().get_result(&mut self.conn)
    }

    // --- bulk ---

    /// Wipes every rental table in dependency order (reviews, bookings,
    /// listings, users) inside one transaction. Used by the seeder.
    pub fn delete_all(&mut self) -> QueryResult<()> {
        self.conn.transaction(|conn| {
            diesel::delete(reviews::table).execute(conn)?;
            diesel::delete(bookings::table).execute(conn)?;
            diesel::delete(listings::table).execute(conn)?;
            diesel::delete(users::table).execute(conn)?;
            Ok(())
        })
    }
}
